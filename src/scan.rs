//! Content discovery and manifest generation.
//!
//! Stage 1 of the simple-docs build pipeline. Walks the configured source
//! trees to discover content nodes, producing a structured manifest that the
//! route stage consumes.
//!
//! ## Source Trees
//!
//! Three trees are scanned, each mapping to one content family:
//!
//! ```text
//! site/
//! ├── config.toml                      # Site configuration (optional)
//! ├── sources/react/                   # family = react
//! │   └── react-core/
//! │       └── AboutModal/
//! │           └── examples/
//! │               ├── index.md         # Doc node (front-matter + markdown)
//! │               └── AboutModalDemo.js
//! ├── sources/core/                    # family = core
//! │   └── src/patternlib/
//! │       └── components/
//! │           └── Button/
//! │               ├── button.hbs       # Partial, picked up separately
//! │               └── examples/
//! │                   └── index.js     # Example node
//! └── content/                         # family = content
//!     └── get-started.md               # Standalone page (`path` front-matter)
//! ```
//!
//! ## Front-matter
//!
//! Doc and content files may open with a YAML block fenced by `---` lines.
//! Recognized fields are `title`, `section`, `fullscreen`, and `path`;
//! unknown keys are ignored. A file whose block fails to parse is kept with
//! default front-matter and reported as a warning — one bad file must not
//! abort the batch. A scan-level I/O failure is fatal: no pages can be
//! derived without the content walk.

use crate::config::{self, SiteConfig};
use crate::types::{ContentNode, Family, Frontmatter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source root does not exist: {0}")]
    MissingRoot(PathBuf),
}

/// Example entry files recognized under a core `examples/` directory.
const EXAMPLE_ENTRIES: &[&str] = &["index.js", "index.hbs"];

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Framework component documentation nodes.
    pub docs: Vec<ContentNode>,
    /// Core library example nodes.
    pub examples: Vec<ContentNode>,
    /// Standalone content page nodes.
    pub pages: Vec<ContentNode>,
    /// Per-file problems that did not abort the scan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub config: SiteConfig,
}

pub fn scan(site_dir: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(site_dir)?;

    let mut warnings = Vec::new();
    let docs = scan_docs(&site_dir.join(&config.sources.react_root), &mut warnings)?;
    let examples = scan_examples(&site_dir.join(&config.sources.core_root))?;
    let pages = scan_pages(&site_dir.join(&config.sources.content_root), &mut warnings)?;

    Ok(Manifest {
        docs,
        examples,
        pages,
        warnings,
        config,
    })
}

/// Walk the react tree for markdown doc nodes.
fn scan_docs(root: &Path, warnings: &mut Vec<String>) -> Result<Vec<ContentNode>, ScanError> {
    let mut nodes = Vec::new();
    for path in walk_files(root)? {
        if !has_extension(&path, "md") {
            continue;
        }
        let content = fs::read_to_string(&path)?;
        let location = path.to_string_lossy().to_string();
        let (frontmatter, body) = parse_front_matter(&content, &location, warnings);
        nodes.push(ContentNode {
            location,
            frontmatter,
            family: Family::React,
            body,
        });
    }
    nodes.sort_by(|a, b| a.location.cmp(&b.location));
    Ok(nodes)
}

/// Walk the core tree for `examples/index.*` entry files.
///
/// Example sources are not read here; the generate stage loads them when it
/// renders the embed.
fn scan_examples(root: &Path) -> Result<Vec<ContentNode>, ScanError> {
    let mut nodes = Vec::new();
    for path in walk_files(root)? {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy(),
            None => continue,
        };
        let in_examples_dir = path
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|d| d == "examples");
        if in_examples_dir && EXAMPLE_ENTRIES.contains(&name.as_ref()) {
            nodes.push(ContentNode {
                location: path.to_string_lossy().to_string(),
                frontmatter: Frontmatter::default(),
                family: Family::Core,
                body: String::new(),
            });
        }
    }
    nodes.sort_by(|a, b| a.location.cmp(&b.location));
    Ok(nodes)
}

/// Walk the content tree for standalone markdown pages.
///
/// Only files whose front-matter carries a `path` become nodes; the rest are
/// reported and skipped.
fn scan_pages(root: &Path, warnings: &mut Vec<String>) -> Result<Vec<ContentNode>, ScanError> {
    let mut nodes = Vec::new();
    for path in walk_files(root)? {
        if !has_extension(&path, "md") {
            continue;
        }
        let content = fs::read_to_string(&path)?;
        let location = path.to_string_lossy().to_string();
        let (frontmatter, body) = parse_front_matter(&content, &location, warnings);
        if frontmatter.path.is_none() {
            warnings.push(format!("content page without a path, skipped: {location}"));
            continue;
        }
        nodes.push(ContentNode {
            location,
            frontmatter,
            family: Family::Content,
            body,
        });
    }
    nodes.sort_by(|a, b| a.location.cmp(&b.location));
    Ok(nodes)
}

/// Collect every file under `root`, sorted for deterministic manifests.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Split a YAML front-matter block off the top of a markdown file.
///
/// Returns the parsed front-matter and the remaining body. A malformed block
/// yields default front-matter plus a warning; the body is kept either way.
fn parse_front_matter(
    content: &str,
    location: &str,
    warnings: &mut Vec<String>,
) -> (Frontmatter, String) {
    let Some((yaml, body)) = split_front_matter(content) else {
        return (Frontmatter::default(), content.to_string());
    };
    match serde_yaml::from_str::<FrontmatterFields>(yaml) {
        Ok(fields) => (fields.into(), body.to_string()),
        Err(err) => {
            warnings.push(format!("unparseable front-matter in {location}: {err}"));
            (Frontmatter::default(), body.to_string())
        }
    }
}

/// Split `content` into (yaml, body) if it opens with a `---` fence.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;
    let end = rest.find("\n---")?;
    let yaml = &rest[..end];
    let after = &rest[end + "\n---".len()..];
    let body = match after.find('\n') {
        Some(i) => &after[i + 1..],
        None => "",
    };
    Some((yaml, body))
}

/// Raw YAML shape. Unknown keys are tolerated here so content carrying
/// front-matter for other tools still scans.
#[derive(Debug, Default, Deserialize)]
struct FrontmatterFields {
    title: Option<String>,
    section: Option<String>,
    #[serde(default)]
    fullscreen: bool,
    path: Option<String>,
}

impl From<FrontmatterFields> for Frontmatter {
    fn from(fields: FrontmatterFields) -> Self {
        Frontmatter {
            title: fields.title,
            section: fields.section,
            fullscreen: fields.fullscreen,
            path: fields.path,
        }
    }
}
