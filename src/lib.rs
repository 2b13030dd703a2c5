//! # Simple Docs
//!
//! A minimal static site generator for component-library documentation
//! websites. Your source repositories are the data source: component doc
//! markdown, core library examples, and standalone content pages are
//! discovered on disk, routed to canonical URL paths, and rendered as a
//! plain HTML site.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Simple Docs processes content through three independent stages, each
//! producing a JSON manifest that the next stage consumes:
//!
//! ```text
//! 1. Scan      sources/ + content/  →  manifest.json   (filesystem → content nodes)
//! 2. Route     manifest             →  routes.json     (nodes → page registrations)
//! 3. Generate  routes + manifest    →  dist/           (final HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each manifest is human-readable JSON you can inspect.
//! - **Auditability**: the route plan shows every page the site will have
//!   before anything is rendered.
//! - **Testability**: scan and route are pure functions of their inputs, so
//!   unit tests can exercise the routing rules without rendering a site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the source trees, parses front-matter, produces the scan manifest |
//! | [`route`] | Stage 2 — the routing rule table and the page annotation pass |
//! | [`generate`] | Stage 3 — renders the final HTML site from the route plan using Maud |
//! | [`registry`] | Registered pages keyed by URL path, duplicate paths overwrite |
//! | [`naming`] | Path and label derivation shared by routing and annotation |
//! | [`partials`] | Lazily-built template partial lookup table and expansion |
//! | [`assets`] | Loader rules, alias resolution, and per-stage style chunking |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`types`] | Shared types serialized between stages |
//! | [`output`] | CLI output formatting — per-stage display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Routing as a Rule Table
//!
//! Page routing is an ordered list of (predicate, handler) pairs evaluated
//! first-match-wins, not a nest of conditionals. Each rule reads on its
//! own, tests on its own, and the evaluation order is explicit in one
//! place. A node no rule can handle falls back to a sentinel path rather
//! than failing the batch — one malformed content file must never take
//! down a site build.
//!
//! ## Classification Tagged Once
//!
//! Every content node is tagged with its family when scanned, and every
//! route carries its page class. Downstream passes (annotation, templates)
//! key off those tags instead of re-matching URL strings, so there is one
//! definition of each classification in the whole pipeline.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and interpolation
//! is auto-escaped. The handlebars *sources* this tool embeds are content,
//! not templates — they are expanded textually via [`partials`] and shown
//! on example pages.
//!
//! ## Lazy, Coalesced Partials Map
//!
//! The partial-name → location map is built at most once per process, on
//! first use, with concurrent first callers coalescing onto a single
//! build. It is then passed explicitly into the asset pipeline; nothing
//! reads it through a global.

pub mod assets;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod partials;
pub mod registry;
pub mod route;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
