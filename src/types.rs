//! Shared types used across all pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → route → generate)
//! and must be identical across all three modules.

use serde::{Deserialize, Serialize};

/// Which source tree a content node was discovered under.
///
/// The family is tagged once at scan time from the node's source root and
/// carried with the node from then on; no later stage re-derives it from
/// path patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Core component library examples (`examples/index.js` entries).
    Core,
    /// Framework component documentation markdown.
    React,
    /// Standalone content pages (markdown with an explicit `path`).
    Content,
}

/// Front-matter fields recognized on a content file.
///
/// All fields are optional. Unknown keys are ignored — content repositories
/// carry front-matter for other tools too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title, shown in the rendered page header.
    pub title: Option<String>,
    /// Navigation section (`components`, `layouts`, `demos`, ...).
    pub section: Option<String>,
    /// Render without surrounding chrome, examples on their own pages.
    pub fullscreen: bool,
    /// Literal URL path. Presence marks a standalone content page.
    pub path: Option<String>,
}

/// One discovered content unit: a source file plus its front-matter.
///
/// Created by the scan stage, one per matched source file, immutable
/// thereafter. The router consumes each node exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    /// Filesystem path of the source file; unique per node.
    pub location: String,
    pub frontmatter: Frontmatter,
    pub family: Family,
    /// Raw markdown body (empty for example nodes — their source is read
    /// at generate time).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Which template renders a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    /// Documentation page with chrome, injected examples, and prop tables.
    StandardDoc,
    /// Documentation page rendered in isolation, no chrome.
    FullscreenDoc,
    /// Standalone markdown content page.
    StaticContent,
    /// An interactive example embedded as its own page.
    ExampleEmbed,
}

impl TemplateId {
    /// Stable identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::StandardDoc => "standard-doc",
            TemplateId::FullscreenDoc => "fullscreen-doc",
            TemplateId::StaticContent => "static-content",
            TemplateId::ExampleEmbed => "example-embed",
        }
    }
}

/// Classification carried on every route, consumed by the annotation pass.
///
/// Computed once when the route is created, so annotation never has to
/// re-derive the class from the URL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageClass {
    ReactDoc,
    CoreDoc,
    Other,
}

/// Context data passed to the template that renders a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Source file the page was derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    /// Pattern downstream machinery uses to gather sibling artifacts
    /// (generated prop tables) under the same component folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_regex: Option<String>,
    /// Pattern for the sibling example files to inject into the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples_regex: Option<String>,
}

/// The registration unit: one servable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Canonical URL path, always lowercase for derived routes.
    pub url_path: String,
    pub template: TemplateId,
    pub context: PageContext,
    pub class: PageClass,
}
