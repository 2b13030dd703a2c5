//! Template partial discovery and expansion.
//!
//! Core component templates reference reusable fragments by name
//! (`{{> button}}`). This module owns the map from partial name to file
//! location: built once by walking the partials root for `*.hbs` files
//! (examples directories are skipped — those are demo entry points, not
//! fragments), immutable afterwards.
//!
//! The map is expensive to build relative to how often it changes (never,
//! within one process), so [`LazyPartials`] defers construction to first
//! use and coalesces concurrent first callers onto a single build. The
//! built map is explicitly passed into the asset pipeline rather than read
//! from a global.
//!
//! A lookup of an unknown partial is a named error: fatal to the one asset
//! expansion that requested it, not to the page-generation pass.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

/// Expansion recursion bound; a chain deeper than this is a cycle.
const MAX_DEPTH: usize = 8;

#[derive(Error, Debug)]
pub enum PartialsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Could not find partial: {0}")]
    Unknown(String),
    #[error("Partial expansion deeper than {MAX_DEPTH} levels at {0} (reference cycle)")]
    TooDeep(String),
    #[error("Partials map build failed: {0}")]
    Build(String),
}

/// Immutable map from partial name (file stem) to its location.
#[derive(Debug, Default)]
pub struct PartialsMap {
    map: BTreeMap<String, PathBuf>,
}

impl PartialsMap {
    /// Build the map by walking `root` for `*.hbs` files.
    ///
    /// Files under any `examples/` directory are skipped. A missing root
    /// yields an empty map: a site without handlebars templates is valid.
    pub fn build(root: &Path) -> Result<Self, PartialsError> {
        let mut map = BTreeMap::new();
        if !root.is_dir() {
            return Ok(Self { map });
        }
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == "examples"));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_hbs = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("hbs"))
                .unwrap_or(false);
            if !is_hbs {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                // Same-named partials in different folders: last walked wins,
                // matching registration overwrite semantics elsewhere.
                map.insert(stem.to_string_lossy().to_string(), path.to_path_buf());
            }
        }
        Ok(Self { map })
    }

    /// Location of a named partial.
    pub fn get(&self, name: &str) -> Result<&Path, PartialsError> {
        self.map
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| PartialsError::Unknown(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Partial names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// Lazily-built [`PartialsMap`] for the process lifetime.
///
/// Concurrent first callers coalesce onto one build; every later call gets
/// the same immutable map. Build failures are sticky and re-reported.
#[derive(Debug)]
pub struct LazyPartials {
    root: PathBuf,
    cell: OnceLock<Result<PartialsMap, String>>,
}

impl LazyPartials {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            cell: OnceLock::new(),
        }
    }

    /// The map, building it on first use.
    pub fn get_or_build(&self) -> Result<&PartialsMap, PartialsError> {
        match self
            .cell
            .get_or_init(|| PartialsMap::build(&self.root).map_err(|e| e.to_string()))
        {
            Ok(map) => Ok(map),
            Err(msg) => Err(PartialsError::Build(msg.clone())),
        }
    }
}

/// Inline every `{{> name}}` reference in `source`.
///
/// Referenced partials are read from the map's locations and expanded
/// recursively up to [`MAX_DEPTH`] levels. Unknown names and cycles error;
/// the caller decides how far the failure reaches (one asset, not the
/// whole pass).
pub fn expand(source: &str, partials: &PartialsMap) -> Result<String, PartialsError> {
    expand_at(source, partials, 0)
}

fn expand_at(source: &str, partials: &PartialsMap, depth: usize) -> Result<String, PartialsError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("{{>") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let end = after
            .find("}}")
            .ok_or_else(|| PartialsError::Build("unterminated partial reference".to_string()))?;
        // First whitespace-separated token names the partial; the rest of
        // the reference (hash params) is dropped.
        let name = after[..end]
            .split_whitespace()
            .next()
            .ok_or_else(|| PartialsError::Unknown(String::new()))?
            .to_string();
        if depth >= MAX_DEPTH {
            return Err(PartialsError::TooDeep(name));
        }
        let location = partials.get(&name)?;
        let content = fs::read_to_string(location)?;
        out.push_str(&expand_at(&content, partials, depth + 1)?);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}
