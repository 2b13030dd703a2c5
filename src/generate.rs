//! HTML site generation.
//!
//! Stage 3 of the simple-docs build pipeline. Registers the route plan's
//! pages, attaches display metadata, and renders the final static site.
//!
//! ## Generated Pages
//!
//! Each registered page is rendered by the template its route selected:
//!
//! - **standard-doc**: documentation page with site chrome, rendered
//!   markdown, and the page context embedded for client-side tooling
//! - **fullscreen-doc**: the same content rendered in isolation, no chrome
//! - **static-content**: standalone markdown page with chrome
//! - **example-embed**: an interactive example's source, handlebars
//!   partials expanded, on its own page
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── documentation/react/components/aboutmodal/index.html
//! ├── documentation/core/components/button/index.html
//! ├── documentation/core/components/button-full/index.html
//! ├── get-started/about/index.html       # static content page
//! ├── get-started/index.html             # redirect stub
//! └── styles.css                         # production stage only
//! ```
//!
//! ## Failure Isolation
//!
//! A page whose example source cannot be read, or whose partial expansion
//! fails, fails alone: it is recorded in the summary and the rest of the
//! site still generates. Only filesystem errors on the output tree abort
//! the stage.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::assets::{AssetPipeline, Stage};
use crate::partials::LazyPartials;
use crate::registry::{PageRegistry, RegisteredPage};
use crate::route::RoutePlan;
use crate::scan::Manifest;
use crate::types::{ContentNode, PageContext, RouteEntry, TemplateId};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// One rendered page in the summary.
#[derive(Debug)]
pub struct RenderedPage {
    pub url_path: String,
    pub template: TemplateId,
}

/// Result of the generate stage.
#[derive(Debug)]
pub struct GenerateSummary {
    pub pages: Vec<RenderedPage>,
    /// (url path, reason) for pages that failed alone.
    pub failed: Vec<(String, String)>,
    pub redirects: usize,
    /// Stylesheets written (bundled count or copied count).
    pub styles: usize,
    pub styles_bundled: bool,
}

pub fn generate(
    manifest: &Manifest,
    plan: &RoutePlan,
    site_dir: &Path,
    output_dir: &Path,
    stage: Stage,
) -> Result<GenerateSummary, GenerateError> {
    let registry = PageRegistry::from_plan(plan);

    let partials = LazyPartials::new(site_dir.join(&manifest.config.partials.root));
    let pipeline = AssetPipeline::configure(stage, &manifest.config, site_dir, &partials);

    // Markdown bodies travel in the manifest; look them up by location.
    let bodies: BTreeMap<&str, &ContentNode> = manifest
        .docs
        .iter()
        .chain(manifest.examples.iter())
        .chain(manifest.pages.iter())
        .map(|node| (node.location.as_str(), node))
        .collect();

    fs::create_dir_all(output_dir)?;

    // Pages are independent: render them in parallel, write sequentially.
    let pages: Vec<&RegisteredPage> = registry.iter().collect();
    let rendered: Vec<(String, TemplateId, Result<String, String>)> = pages
        .par_iter()
        .map(|page| {
            (
                page.entry.url_path.clone(),
                page.entry.template,
                render_page(page, &bodies, &pipeline),
            )
        })
        .collect();

    let mut summary = GenerateSummary {
        pages: Vec::new(),
        failed: Vec::new(),
        redirects: 0,
        styles: 0,
        styles_bundled: pipeline.bundles_styles(),
    };

    for (url_path, template, result) in rendered {
        match result {
            Ok(html) => {
                let output = url_to_output(output_dir, &url_path);
                if let Some(parent) = output.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output, html)?;
                summary.pages.push(RenderedPage { url_path, template });
            }
            Err(reason) => summary.failed.push((url_path, reason)),
        }
    }

    for redirect in &manifest.config.redirects {
        let output = url_to_output(output_dir, &redirect.from);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output, redirect_stub(&redirect.to).into_string())?;
        summary.redirects += 1;
    }

    summary.styles = write_styles(
        &pipeline,
        &site_dir.join(&manifest.config.sources.core_root),
        output_dir,
    )?;

    Ok(summary)
}

/// Map a URL path to its output file: `/a/b/` → `a/b/index.html`.
fn url_to_output(output_dir: &Path, url_path: &str) -> PathBuf {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

/// Render one page with the template its route selected.
///
/// Per-page failures come back as `Err(reason)` so the caller can isolate
/// them.
fn render_page(
    page: &RegisteredPage,
    bodies: &BTreeMap<&str, &ContentNode>,
    pipeline: &AssetPipeline,
) -> Result<String, String> {
    let entry = &page.entry;
    let title = page_title(page);
    let body = entry
        .context
        .source_location
        .as_deref()
        .and_then(|loc| bodies.get(loc))
        .map(|node| node.body.as_str())
        .unwrap_or("");

    let markup = match entry.template {
        TemplateId::StandardDoc => standard_doc(&title, page, body),
        TemplateId::FullscreenDoc => fullscreen_doc(&title, body),
        TemplateId::StaticContent => static_content(&title, body),
        TemplateId::ExampleEmbed => example_embed(&title, entry, pipeline)?,
    };
    Ok(markup.into_string())
}

fn page_title(page: &RegisteredPage) -> String {
    page.entry
        .context
        .title
        .clone()
        .or_else(|| page.fields.label.clone())
        .unwrap_or_else(|| {
            page.entry
                .url_path
                .trim_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or("Documentation")
                .to_string()
        })
}

// ============================================================================
// Templates
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS_STATIC)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Site chrome: breadcrumb back to the documentation root.
fn site_header(label: &str) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                a href="/" { "Documentation" }
                span.sep { "/" }
                span { (label) }
            }
        }
    }
}

/// The standard documentation page: chrome, rendered markdown, and the
/// route context embedded for client-side tooling.
fn standard_doc(title: &str, page: &RegisteredPage, body: &str) -> Markup {
    base_document(
        title,
        None,
        html! {
            (site_header(title))
            main data-label=[page.fields.label.as_deref()] data-type=[page.fields.page_type.as_deref()] {
                h1 { (title) }
                (render_markdown(body))
                (context_script(&page.entry.context))
            }
        },
    )
}

/// A documentation page rendered in isolation: no chrome at all.
fn fullscreen_doc(title: &str, body: &str) -> Markup {
    base_document(
        title,
        Some("fullscreen"),
        html! {
            main.fullscreen {
                (render_markdown(body))
            }
        },
    )
}

/// A standalone markdown content page.
fn static_content(title: &str, body: &str) -> Markup {
    base_document(
        title,
        None,
        html! {
            (site_header(title))
            main {
                (render_markdown(body))
            }
        },
    )
}

/// An interactive example embedded as its own page.
///
/// The example source is read here, not at scan time, and handlebars
/// sources get their partial references expanded. Either step failing
/// fails this one page only.
fn example_embed(
    title: &str,
    entry: &RouteEntry,
    pipeline: &AssetPipeline,
) -> Result<Markup, String> {
    let location = entry
        .context
        .source_location
        .as_deref()
        .ok_or_else(|| "example route without a source location".to_string())?;
    let source = fs::read_to_string(location)
        .map_err(|e| format!("cannot read example source {location}: {e}"))?;

    let expanded = match pipeline.loader_for(Path::new(location)) {
        Some("handlebars") => pipeline
            .expand_template(&source)
            .map_err(|e| format!("cannot expand {location}: {e}"))?,
        _ => source,
    };

    Ok(base_document(
        title,
        Some("example"),
        html! {
            main {
                h1 { (title) }
                pre.example-source {
                    code { (expanded) }
                }
            }
        },
    ))
}

/// Browser-side redirect stub.
fn redirect_stub(to: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(format!("0; url={to}"));
                link rel="canonical" href=(to);
                title { "Redirecting" }
            }
            body {
                p {
                    "Redirecting to "
                    a href=(to) { (to) }
                }
            }
        }
    }
}

fn render_markdown(body: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(body));
    PreEscaped(out)
}

/// The route context, embedded as JSON for client-side tooling.
fn context_script(context: &PageContext) -> Markup {
    let json = serde_json::to_string(context).expect("page context must serialize");
    html! {
        script type="application/json" class="page-context" {
            (PreEscaped(json))
        }
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Gather component stylesheets from the core tree.
///
/// Production bundles them all into one `styles.css`; develop copies them
/// individually under `styles/`.
fn write_styles(
    pipeline: &AssetPipeline,
    core_root: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    if !core_root.is_dir() {
        return Ok(0);
    }
    let mut sources = Vec::new();
    for entry in WalkDir::new(core_root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && pipeline.is_style_source(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    if sources.is_empty() {
        return Ok(0);
    }

    if pipeline.bundles_styles() {
        let mut bundle = String::new();
        for source in &sources {
            bundle.push_str(&fs::read_to_string(source)?);
            bundle.push('\n');
        }
        fs::write(output_dir.join("styles.css"), bundle)?;
    } else {
        let styles_dir = output_dir.join("styles");
        for source in &sources {
            let rel = source.strip_prefix(core_root).unwrap_or(source);
            let dest = styles_dir.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, &dest)?;
        }
    }
    Ok(sources.len())
}
