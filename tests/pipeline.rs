//! End-to-end pipeline test: scan → route → generate over a fixture site.

use simple_docs::assets::Stage;
use simple_docs::generate::generate;
use simple_docs::route::route_manifest;
use simple_docs::scan::scan;
use simple_docs::types::TemplateId;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small documentation site covering every content family.
fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "config.toml",
        "[aliases]\n\"@components\" = \"sources/core/src/patternlib/components\"\n\n\
         [[redirects]]\nfrom = \"/documentation\"\nto = \"/documentation/react/components/aboutmodal\"\n",
    );
    write(
        root,
        "sources/react/react-core/AboutModal/examples/index.md",
        "---\ntitle: About Modal\n---\nShows application information.\n",
    );
    write(
        root,
        "sources/react/react-core/LoginPage/examples/index.md",
        "---\ntitle: Login Page\nsection: demos\nfullscreen: true\n---\nA full page demo.\n",
    );
    write(
        root,
        "sources/core/src/patternlib/components/Button/button.hbs",
        "<button class=\"btn\">{{label}}</button>\n",
    );
    write(
        root,
        "sources/core/src/patternlib/components/Button/button.css",
        ".btn { border: 0; }\n",
    );
    write(
        root,
        "sources/core/src/patternlib/components/Button/examples/index.hbs",
        "{{> button}}\n",
    );
    write(
        root,
        "content/get-started.md",
        "---\npath: /get-started/about\ntitle: Get Started\n---\n# Get started\n",
    );

    tmp
}

#[test]
fn full_build_produces_expected_site() {
    let site = site();
    let out = TempDir::new().unwrap();

    let manifest = scan(site.path()).unwrap();
    assert_eq!(manifest.docs.len(), 2);
    assert_eq!(manifest.examples.len(), 1);
    assert_eq!(manifest.pages.len(), 1);

    let plan = route_manifest(&manifest);
    let paths: Vec<&str> = plan.routes.iter().map(|r| r.url_path.as_str()).collect();
    assert!(paths.contains(&"/documentation/react/components/aboutmodal/"));
    assert!(paths.contains(&"/documentation/react/demos/react-core/loginpage/"));
    assert!(paths.contains(&"/documentation/core/components/button"));
    assert!(paths.contains(&"/documentation/core/components/button-full"));
    assert!(paths.contains(&"/get-started/about"));
    assert!(plan.warnings.is_empty(), "warnings: {:?}", plan.warnings);

    // Every derived documentation path is lowercase
    for route in &plan.routes {
        assert_eq!(route.url_path, route.url_path.to_lowercase());
    }

    let summary = generate(&manifest, &plan, site.path(), out.path(), Stage::Production).unwrap();
    assert!(summary.failed.is_empty(), "failures: {:?}", summary.failed);
    assert_eq!(summary.pages.len(), plan.routes.len());

    // Standard doc page with rendered markdown
    let doc = fs::read_to_string(
        out.path()
            .join("documentation/react/components/aboutmodal/index.html"),
    )
    .unwrap();
    assert!(doc.contains("About Modal"));
    assert!(doc.contains("<p>Shows application information.</p>"));

    // The example pair shares its expanded source
    let inline = fs::read_to_string(
        out.path()
            .join("documentation/core/components/button/index.html"),
    )
    .unwrap();
    let full = fs::read_to_string(
        out.path()
            .join("documentation/core/components/button-full/index.html"),
    )
    .unwrap();
    assert!(inline.contains("btn"));
    assert!(full.contains("btn"));

    // Redirect stub and production style bundle
    let redirect = fs::read_to_string(out.path().join("documentation/index.html")).unwrap();
    assert!(redirect.contains("/documentation/react/components/aboutmodal"));
    assert!(
        fs::read_to_string(out.path().join("styles.css"))
            .unwrap()
            .contains(".btn")
    );
}

#[test]
fn route_plan_round_trips_through_json() {
    let site = site();
    let manifest = scan(site.path()).unwrap();
    let plan = route_manifest(&manifest);

    let json = serde_json::to_string_pretty(&plan).unwrap();
    let restored: simple_docs::route::RoutePlan = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.routes, plan.routes);
}

#[test]
fn fullscreen_page_renders_without_chrome() {
    let site = site();
    let out = TempDir::new().unwrap();
    let manifest = scan(site.path()).unwrap();
    let plan = route_manifest(&manifest);
    generate(&manifest, &plan, site.path(), out.path(), Stage::Develop).unwrap();

    let html = fs::read_to_string(
        out.path()
            .join("documentation/react/demos/react-core/loginpage/index.html"),
    )
    .unwrap();
    assert!(!html.contains("<header"));
    assert!(html.contains("A full page demo."));
}

#[test]
fn malformed_doc_survives_the_build() {
    let site = site();
    let out = TempDir::new().unwrap();

    // An empty location defeats every derivation rule; the build must
    // carry on around it.
    let mut manifest = scan(site.path()).unwrap();
    manifest.docs.push(simple_docs::types::ContentNode {
        location: String::new(),
        frontmatter: simple_docs::types::Frontmatter::default(),
        family: simple_docs::types::Family::React,
        body: String::new(),
    });

    let plan = route_manifest(&manifest);
    assert!(!plan.warnings.is_empty());
    assert!(
        plan.routes
            .iter()
            .any(|r| r.url_path == simple_docs::route::SENTINEL_PATH)
    );

    let summary = generate(&manifest, &plan, site.path(), out.path(), Stage::Develop).unwrap();
    assert!(summary.failed.is_empty(), "failures: {:?}", summary.failed);
    assert!(out.path().join("bad-page/index.html").is_file());
}

#[test]
fn example_pair_selects_example_embed_template() {
    let site = site();
    let manifest = scan(site.path()).unwrap();
    let plan = route_manifest(&manifest);

    let pair: Vec<_> = plan
        .routes
        .iter()
        .filter(|r| r.url_path.starts_with("/documentation/core/components/button"))
        .collect();
    assert_eq!(pair.len(), 2);
    assert!(pair.iter().all(|r| r.template == TemplateId::ExampleEmbed));
}
