//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity is its semantic identity — the URL path or content
//! family — with filesystem paths shown as secondary context via indented
//! `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Docs (2)
//!     Source: sources/react/react-core/AboutModal/examples/index.md
//!     Source: sources/react/react-core/PageLayout/examples/index.md
//! Examples (2)
//!     ...
//! Pages (1)
//!     ...
//! ```
//!
//! ## Route
//!
//! ```text
//! Routes (8)
//! /documentation/core/components/button → example-embed
//! /documentation/react/components/aboutmodal/ → standard-doc
//!
//! Warnings
//!     no routing rule matched ...
//! ```
//!
//! ## Generate
//!
//! ```text
//! /documentation/react/components/aboutmodal/ → documentation/react/components/aboutmodal/index.html
//!
//! Generated 8 pages, 1 redirect, 2 stylesheets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::route::RoutePlan;
use crate::scan::Manifest;
use crate::types::ContentNode;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn family_section(lines: &mut Vec<String>, header: &str, nodes: &[ContentNode]) {
    lines.push(format!("{header} ({})", nodes.len()));
    for node in nodes {
        lines.push(format!("{}Source: {}", indent(1), node.location));
    }
}

fn warnings_section(lines: &mut Vec<String>, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Warnings".to_string());
    for warning in warnings {
        lines.push(format!("{}{}", indent(1), warning));
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    family_section(&mut lines, "Docs", &manifest.docs);
    family_section(&mut lines, "Examples", &manifest.examples);
    family_section(&mut lines, "Pages", &manifest.pages);
    warnings_section(&mut lines, &manifest.warnings);
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{line}");
    }
}

// ============================================================================
// Route
// ============================================================================

pub fn format_route_output(plan: &RoutePlan) -> Vec<String> {
    let mut lines = vec![format!("Routes ({})", plan.routes.len())];
    for route in &plan.routes {
        lines.push(format!(
            "{} → {}",
            route.url_path,
            route.template.as_str()
        ));
    }
    warnings_section(&mut lines, &plan.warnings);
    lines
}

pub fn print_route_output(plan: &RoutePlan) {
    for line in format_route_output(plan) {
        println!("{line}");
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &summary.pages {
        let rel = page.url_path.trim_matches('/');
        let output = if rel.is_empty() {
            "index.html".to_string()
        } else {
            format!("{rel}/index.html")
        };
        lines.push(format!("{} → {}", page.url_path, output));
    }
    if !summary.failed.is_empty() {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for (url_path, reason) in &summary.failed {
            lines.push(format!("{}{} ({})", indent(1), url_path, reason));
        }
    }
    lines.push(String::new());
    let styles = if summary.styles_bundled {
        format!("{} stylesheets bundled", summary.styles)
    } else {
        format!("{} stylesheets", summary.styles)
    };
    lines.push(format!(
        "Generated {} pages, {} redirects, {}",
        summary.pages.len(),
        summary.redirects,
        styles
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{line}");
    }
}
