//! Shared fixture builders for unit tests.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a minimal documentation site exercising every content family:
/// two react docs (one standard, one fullscreen with a split link), two
/// core examples (one handlebars, one plain), one standalone content page,
/// a partial with its stylesheet, and a redirect.
pub(crate) fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "config.toml",
        "[[redirects]]\nfrom = \"/get-started\"\nto = \"/get-started/about\"\n",
    );

    write(
        root,
        "sources/react/react-core/AboutModal/examples/index.md",
        "---\ntitle: About Modal\n---\n\
         The about modal component displays application information in a modal dialog.\n",
    );
    write(
        root,
        "sources/react/react-core/PageLayout/examples/index.md",
        "---\ntitle: Page Layout\nsection: layouts\nfullscreen: true\n---\n\
         Layout demos:\n\n[Simple nav](/PageLayoutSimpleNav/)\n",
    );
    write(
        root,
        "sources/react/react-core/PageLayout/examples/PageLayoutSimpleNav.js",
        "export const PageLayoutSimpleNav = () => null;\n",
    );

    write(
        root,
        "sources/core/src/patternlib/components/Button/button.hbs",
        "<button class=\"btn btn-primary\">{{label}}</button>\n",
    );
    write(
        root,
        "sources/core/src/patternlib/components/Button/button.css",
        ".btn-primary { background: #06c; }\n",
    );
    write(
        root,
        "sources/core/src/patternlib/components/Button/examples/index.hbs",
        "{{> button}}\n",
    );
    write(
        root,
        "sources/core/src/patternlib/layouts/Grid/examples/index.js",
        "import './grid.css';\n",
    );

    write(
        root,
        "content/get-started.md",
        "---\npath: /get-started/about\ntitle: Get Started\n---\n\
         # Get started\n\nInstall the packages.\n",
    );

    tmp
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
