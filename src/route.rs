//! Route derivation: mapping content nodes to page registrations.
//!
//! Stage 2 of the simple-docs build pipeline. Takes the scan manifest and
//! derives, for every content node, the canonical URL path, the template
//! that renders it, and the context passed to that template.
//!
//! ## The Rule Table
//!
//! Routing is an ordered list of (predicate, handler) pairs evaluated
//! first-match-wins, so each rule can be read and tested on its own:
//!
//! 1. **Static content page** — front-matter carries a literal `path`.
//! 2. **Core example** — every core node yields an inline embed page plus a
//!    `-full` variant at the same base path.
//! 3. **Fullscreen doc** — react node marked `fullscreen`; links in its own
//!    body become embed pages of their own.
//! 4. **Standard doc** — the default react documentation case.
//!
//! A node whose matched rule cannot derive a path (malformed location) falls
//! back to the sentinel [`SENTINEL_PATH`] instead of failing the batch; the
//! problem is reported in the route plan's warnings.
//!
//! Derived paths are always lowercase. Path uniqueness is NOT enforced here:
//! the registry lets a later registration overwrite an earlier one.

use crate::naming;
use crate::scan::Manifest;
use crate::types::{ContentNode, Family, PageClass, PageContext, RouteEntry, TemplateId};
use pulldown_cmark::{Event, Parser, Tag};
use serde::{Deserialize, Serialize};

/// Fallback path for nodes no rule can derive a location for. Keeps a single
/// malformed content node from aborting the entire page-generation pass.
pub const SENTINEL_PATH: &str = "/bad-page/";

/// Route stage output.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoutePlan {
    pub routes: Vec<RouteEntry>,
    /// Per-node problems that fell back to the sentinel path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// One entry in the routing table.
struct Rule {
    name: &'static str,
    applies: fn(&ContentNode) -> bool,
    /// Returns `None` when the node shape defeats the derivation; the
    /// router then falls back to the sentinel.
    derive: fn(&ContentNode) -> Option<Vec<RouteEntry>>,
}

/// Evaluation order matters: first match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "static-content",
        applies: |node| node.frontmatter.path.is_some(),
        derive: static_content_routes,
    },
    Rule {
        name: "core-example",
        applies: |node| node.family == Family::Core,
        derive: core_example_routes,
    },
    Rule {
        name: "fullscreen-doc",
        applies: |node| node.family == Family::React && node.frontmatter.fullscreen,
        derive: fullscreen_doc_routes,
    },
    Rule {
        name: "standard-doc",
        applies: |node| node.family == Family::React,
        derive: standard_doc_routes,
    },
];

/// Route every node in the manifest.
///
/// Pure function of its input; nodes are independent of each other and
/// could be routed in any order.
pub fn route_manifest(manifest: &Manifest) -> RoutePlan {
    let mut plan = RoutePlan {
        routes: Vec::new(),
        warnings: Vec::new(),
    };
    for node in manifest
        .docs
        .iter()
        .chain(manifest.examples.iter())
        .chain(manifest.pages.iter())
    {
        plan.routes.extend(route_node(node, &mut plan.warnings));
    }
    plan
}

/// Route one node through the rule table.
///
/// Never fails: a node that defeats every rule gets the sentinel route.
pub fn route_node(node: &ContentNode, warnings: &mut Vec<String>) -> Vec<RouteEntry> {
    for rule in RULES {
        if !(rule.applies)(node) {
            continue;
        }
        match (rule.derive)(node) {
            Some(routes) => return routes,
            None => {
                warnings.push(format!(
                    "rule {} could not derive a path for {}, routed to {}",
                    rule.name, node.location, SENTINEL_PATH
                ));
                return vec![sentinel_route(node)];
            }
        }
    }
    warnings.push(format!(
        "no routing rule matched {}, routed to {}",
        node.location, SENTINEL_PATH
    ));
    vec![sentinel_route(node)]
}

fn sentinel_route(node: &ContentNode) -> RouteEntry {
    RouteEntry {
        url_path: SENTINEL_PATH.to_string(),
        template: TemplateId::StandardDoc,
        context: PageContext {
            source_location: Some(node.location.clone()),
            ..PageContext::default()
        },
        class: PageClass::Other,
    }
}

/// Rule 1: a recognized static content page routes to its literal path with
/// an empty context.
fn static_content_routes(node: &ContentNode) -> Option<Vec<RouteEntry>> {
    let path = node.frontmatter.path.clone()?;
    Some(vec![RouteEntry {
        url_path: path,
        template: TemplateId::StaticContent,
        context: PageContext::default(),
        class: PageClass::Other,
    }])
}

/// Rule 2: a core example yields an inline embed page plus a `-full`
/// variant.
///
/// The base path takes the two ancestor segments ending two above the entry
/// file (`.../components/Button/examples/index.js` → `components/button`).
/// Both entries derive from the one shared base so the pair cannot drift.
fn core_example_routes(node: &ContentNode) -> Option<Vec<RouteEntry>> {
    let segs: Vec<&str> = node
        .location
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect();
    if segs.len() < 4 {
        return None;
    }
    let window = &segs[segs.len() - 4..segs.len() - 2];
    let base = format!("/documentation/core/{}", window.join("/")).to_lowercase();

    let component = naming::component_name(&node.location).ok()?;
    let context = PageContext {
        title: Some(naming::humanize(&component)),
        source_location: Some(node.location.clone()),
        ..PageContext::default()
    };

    // Every interactive example gets both an inline and a dedicated
    // full-page route.
    Some(vec![
        RouteEntry {
            url_path: base.clone(),
            template: TemplateId::ExampleEmbed,
            context: context.clone(),
            class: PageClass::CoreDoc,
        },
        RouteEntry {
            url_path: format!("{base}-full"),
            template: TemplateId::ExampleEmbed,
            context,
            class: PageClass::CoreDoc,
        },
    ])
}

/// Rule 3: a fullscreen react doc renders in isolation; links in its own
/// body each get an embed page under the doc's path.
fn fullscreen_doc_routes(node: &ContentNode) -> Option<Vec<RouteEntry>> {
    let section = naming::resolve_section(node.frontmatter.section.as_deref());
    let category = naming::parent_folder(&node.location, 3)?;
    let component = naming::component_name(&node.location).ok()?;
    let url_path =
        format!("/documentation/react/{section}/{category}/{component}/").to_lowercase();

    let mut routes = vec![RouteEntry {
        url_path: url_path.clone(),
        template: TemplateId::FullscreenDoc,
        // Fullscreen pages render in isolation: no prop-extraction regex.
        context: PageContext {
            title: node.frontmatter.title.clone(),
            source_location: Some(node.location.clone()),
            ..PageContext::default()
        },
        class: PageClass::ReactDoc,
    }];
    routes.extend(split_page_routes(node, &url_path));
    Some(routes)
}

/// Embed pages for every local link in a fullscreen doc's body.
///
/// A link `[demo](/PageLayoutSimpleNav/)` is assumed to have a sibling
/// `examples/PageLayoutSimpleNav.js` source.
fn split_page_routes(node: &ContentNode, base_url: &str) -> Vec<RouteEntry> {
    let parent = match node.location.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => return Vec::new(),
    };
    // The doc may live beside its examples dir or inside it.
    let examples_dir = if parent.ends_with("/examples") || parent == "examples" {
        parent
    } else {
        format!("{parent}/examples")
    };
    body_links(&node.body)
        .iter()
        .filter_map(|link| {
            let cleaned = link.replace('.', "");
            let split: Vec<&str> = cleaned.split('/').filter(|s| !s.is_empty()).collect();
            let demo_component = (*split.last()?).to_string();
            Some(RouteEntry {
                url_path: format!("{base_url}{}/", split.join("/")).to_lowercase(),
                template: TemplateId::ExampleEmbed,
                context: PageContext {
                    title: Some(naming::humanize(&demo_component)),
                    source_location: Some(format!("{examples_dir}/{demo_component}.js")),
                    ..PageContext::default()
                },
                class: PageClass::ReactDoc,
            })
        })
        .collect()
}

/// Rule 4: the default documentation case.
fn standard_doc_routes(node: &ContentNode) -> Option<Vec<RouteEntry>> {
    let section = naming::resolve_section(node.frontmatter.section.as_deref());
    let component = naming::component_name(&node.location).ok()?;
    let folder = naming::owning_folder(&node.location)?;
    let url_path = format!("/documentation/react/{section}/{component}/").to_lowercase();

    Some(vec![RouteEntry {
        url_path,
        template: TemplateId::StandardDoc,
        context: PageContext {
            title: node.frontmatter.title.clone(),
            source_location: Some(node.location.clone()),
            // Gathers the docgenned props living under the same folder.
            path_regex: Some(format!("/{folder}/.*/")),
            // Gathers the sibling example files to inject.
            examples_regex: Some(format!("/{folder}/examples/.*/")),
        },
        class: PageClass::ReactDoc,
    }])
}

/// Local links in a markdown body, in document order.
fn body_links(body: &str) -> Vec<String> {
    let mut links = Vec::new();
    for event in Parser::new(body) {
        if let Event::Start(Tag::Link { dest_url, .. }) = event {
            let dest = dest_url.to_string();
            if !dest.starts_with("http://") && !dest.starts_with("https://") {
                links.push(dest);
            }
        }
    }
    links
}

// =============================================================================
// Page annotation
// =============================================================================

/// Display metadata attached to an already-registered page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
}

/// Derive the display metadata for a registered page.
///
/// Keyed entirely by the classification the route carries, so annotation
/// never re-derives the class from the URL string. Pure, and therefore
/// idempotent: annotating the same entry twice yields identical fields.
pub fn annotate(entry: &RouteEntry) -> PageFields {
    match entry.class {
        PageClass::ReactDoc => PageFields {
            label: entry
                .context
                .source_location
                .as_deref()
                .and_then(|loc| naming::component_name(loc).ok())
                .map(|name| naming::humanize(&name)),
            page_type: None,
        },
        PageClass::CoreDoc => {
            let label = entry.context.source_location.as_deref().and_then(|loc| {
                let segs: Vec<&str> = loc
                    .split(['/', '\\'])
                    .filter(|s| !s.is_empty())
                    .collect();
                segs.len()
                    .checked_sub(3)
                    .map(|i| naming::humanize(segs[i]))
            });
            let page_type = entry.url_path.split('/').nth(3).map(|s| s.to_string());
            PageFields { label, page_type }
        }
        PageClass::Other => PageFields::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frontmatter;

    fn react_node(location: &str, frontmatter: Frontmatter) -> ContentNode {
        ContentNode {
            location: location.to_string(),
            frontmatter,
            family: Family::React,
            body: String::new(),
        }
    }

    fn core_node(location: &str) -> ContentNode {
        ContentNode {
            location: location.to_string(),
            frontmatter: Frontmatter::default(),
            family: Family::Core,
            body: String::new(),
        }
    }

    #[test]
    fn standard_doc_end_to_end() {
        let node = react_node(
            "/repos/react-core/AboutModal/examples/index.md",
            Frontmatter::default(),
        );
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].url_path, "/documentation/react/components/aboutmodal/");
        assert_eq!(routes[0].template, TemplateId::StandardDoc);
        assert_eq!(
            routes[0].context.path_regex.as_deref(),
            Some("/AboutModal/.*/")
        );
        assert_eq!(
            routes[0].context.examples_regex.as_deref(),
            Some("/AboutModal/examples/.*/")
        );
        assert_eq!(routes[0].class, PageClass::ReactDoc);
    }

    #[test]
    fn fullscreen_doc_end_to_end() {
        let node = react_node(
            "/repos/react-core/AboutModal/examples/index.md",
            Frontmatter {
                fullscreen: true,
                section: Some("layouts".to_string()),
                ..Frontmatter::default()
            },
        );
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert_eq!(routes.len(), 1);
        assert_eq!(
            routes[0].url_path,
            "/documentation/react/layouts/react-core/aboutmodal/"
        );
        assert_eq!(routes[0].template, TemplateId::FullscreenDoc);
        // Fullscreen pages carry no prop-extraction regex
        assert_eq!(routes[0].context.path_regex, None);
        assert_eq!(routes[0].context.examples_regex, None);
    }

    #[test]
    fn core_example_yields_inline_and_full_pair() {
        let node = core_node("/repos/core/src/patternlib/components/Button/examples/index.js");
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].url_path, "/documentation/core/components/button");
        assert_eq!(routes[1].url_path, "/documentation/core/components/button-full");
        assert_eq!(routes[0].template, TemplateId::ExampleEmbed);
        assert_eq!(routes[1].template, TemplateId::ExampleEmbed);
        // The pair shares one derived base
        assert!(routes[1].url_path.starts_with(&routes[0].url_path));
        assert_eq!(routes[0].class, PageClass::CoreDoc);
    }

    #[test]
    fn static_content_routes_to_literal_path() {
        let node = ContentNode {
            location: "/site/content/get-started.md".to_string(),
            frontmatter: Frontmatter {
                path: Some("/get-started/about".to_string()),
                ..Frontmatter::default()
            },
            family: Family::Content,
            body: String::new(),
        };
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].url_path, "/get-started/about");
        assert_eq!(routes[0].template, TemplateId::StaticContent);
        assert_eq!(routes[0].context, PageContext::default());
    }

    #[test]
    fn explicit_path_wins_over_family_rules() {
        // First match wins: a react node carrying a literal path is a
        // static content page, whatever its family says.
        let node = react_node(
            "/repos/react-core/AboutModal/examples/index.md",
            Frontmatter {
                path: Some("/special".to_string()),
                ..Frontmatter::default()
            },
        );
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        assert_eq!(routes[0].template, TemplateId::StaticContent);
        assert_eq!(routes[0].url_path, "/special");
    }

    #[test]
    fn derived_paths_are_lowercase() {
        let nodes = [
            react_node(
                "/repos/react-core/AboutModal/examples/index.md",
                Frontmatter::default(),
            ),
            react_node(
                "/repos/react-core/AboutModal/examples/index.md",
                Frontmatter {
                    fullscreen: true,
                    ..Frontmatter::default()
                },
            ),
            core_node("/repos/core/src/patternlib/components/Button/examples/index.js"),
        ];
        let mut warnings = Vec::new();
        for node in &nodes {
            for route in route_node(node, &mut warnings) {
                assert_eq!(route.url_path, route.url_path.to_lowercase());
                assert!(!route.url_path.contains("AboutModal"));
                assert!(!route.url_path.contains("Button"));
            }
        }
    }

    #[test]
    fn malformed_node_routes_to_sentinel() {
        let node = react_node("", Frontmatter::default());
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].url_path, SENTINEL_PATH);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn shallow_core_location_routes_to_sentinel() {
        let node = core_node("examples/index.js");
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        assert_eq!(routes[0].url_path, SENTINEL_PATH);
        assert!(warnings[0].contains("core-example"));
    }

    #[test]
    fn content_family_without_path_routes_to_sentinel() {
        // The Open Question catch-all: a node shape no rule claims.
        let node = ContentNode {
            location: "/site/content/odd.md".to_string(),
            frontmatter: Frontmatter::default(),
            family: Family::Content,
            body: String::new(),
        };
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        assert_eq!(routes[0].url_path, SENTINEL_PATH);
    }

    #[test]
    fn fullscreen_body_links_become_embed_routes() {
        let node = ContentNode {
            location: "/repos/react-core/PageLayout/examples/index.md".to_string(),
            frontmatter: Frontmatter {
                fullscreen: true,
                ..Frontmatter::default()
            },
            family: Family::React,
            body: "See [simple nav](/PageLayoutSimpleNav/) and \
                   [external](https://example.com/skip)."
                .to_string(),
        };
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);

        assert_eq!(routes.len(), 2);
        assert_eq!(
            routes[1].url_path,
            "/documentation/react/components/react-core/pagelayout/pagelayoutsimplenav/"
        );
        assert_eq!(routes[1].template, TemplateId::ExampleEmbed);
        assert_eq!(
            routes[1].context.source_location.as_deref(),
            Some("/repos/react-core/PageLayout/examples/PageLayoutSimpleNav.js")
        );
    }

    // =========================================================================
    // Annotation
    // =========================================================================

    #[test]
    fn react_doc_annotation_label() {
        let node = react_node(
            "/repos/react-core/AboutModal/examples/index.md",
            Frontmatter::default(),
        );
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        let fields = annotate(&routes[0]);
        assert_eq!(fields.label.as_deref(), Some("About Modal"));
        assert_eq!(fields.page_type, None);
    }

    #[test]
    fn core_doc_annotation_label_and_type() {
        let node = core_node("/repos/core/src/patternlib/components/Button/examples/index.js");
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        let fields = annotate(&routes[0]);
        assert_eq!(fields.label.as_deref(), Some("Button"));
        assert_eq!(fields.page_type.as_deref(), Some("components"));
    }

    #[test]
    fn other_pages_receive_no_fields() {
        let node = ContentNode {
            location: "/site/content/get-started.md".to_string(),
            frontmatter: Frontmatter {
                path: Some("/get-started/about".to_string()),
                ..Frontmatter::default()
            },
            family: Family::Content,
            body: String::new(),
        };
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        assert_eq!(annotate(&routes[0]), PageFields::default());
    }

    #[test]
    fn annotation_is_idempotent() {
        let node = core_node("/repos/core/src/patternlib/components/Button/examples/index.js");
        let mut warnings = Vec::new();
        let routes = route_node(&node, &mut warnings);
        assert_eq!(annotate(&routes[0]), annotate(&routes[0]));
    }

    #[test]
    fn body_links_skips_external() {
        let links = body_links("[a](/Demo/) [b](https://x.y) [c](./Other/)");
        assert_eq!(links, vec!["/Demo/", "./Other/"]);
    }
}
