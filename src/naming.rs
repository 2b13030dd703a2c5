//! Centralized path and label derivation.
//!
//! All content families resolve through the same small set of rules: the
//! file identifies the component, ancestor directories identify its
//! category, and display labels come from splitting camel-case identifiers.
//! This module provides those derivations as pure functions so the router
//! and the annotation pass cannot drift apart.
//!
//! ## The owning component reference
//!
//! Component doc units come in two layouts:
//!
//! ```text
//! react-core/AboutModal/AboutModal.md        # file named after the component
//! react-core/AboutModal/examples/index.md    # conventional examples entry
//! ```
//!
//! In both cases the component is `AboutModal`. [`component_name`] and
//! [`owning_folder`] resolve the `examples/index.*` convention so the rest
//! of the pipeline never sees the literal `index` stem.

use thiserror::Error;

/// Section used when front-matter carries none.
pub const DEFAULT_SECTION: &str = "components";

/// Directory name that marks a conventional examples leaf.
const EXAMPLES_DIR: &str = "examples";

#[derive(Error, Debug, PartialEq)]
pub enum NamingError {
    #[error("cannot derive a name from location {0:?}")]
    BadLocation(String),
}

fn segments(location: &str) -> Vec<&str> {
    location
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect()
}

/// The last path segment with its extension stripped.
///
/// `.../AboutModal/AboutModal.md` → `AboutModal`. Fails only on an
/// empty/malformed location — a configuration error, never retried.
pub fn file_name(location: &str) -> Result<String, NamingError> {
    let segs = segments(location);
    let last = segs
        .last()
        .ok_or_else(|| NamingError::BadLocation(location.to_string()))?;
    Ok(strip_extension(last).to_string())
}

fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    }
}

/// The path segment `depth` levels above the file.
///
/// `depth = 1` is the immediate containing directory; `depth = 3` recovers
/// the category name for nested example directories. Returns `None` when the
/// location is too shallow.
pub fn parent_folder(location: &str, depth: usize) -> Option<String> {
    let segs = segments(location);
    if depth == 0 || segs.len() <= depth {
        return None;
    }
    Some(segs[segs.len() - 1 - depth].to_string())
}

/// The component's owning directory.
///
/// The immediate parent, unless the file sits in a conventional `examples`
/// leaf, in which case the directory above it.
pub fn owning_folder(location: &str) -> Option<String> {
    match parent_folder(location, 1) {
        Some(parent) if parent == EXAMPLES_DIR => parent_folder(location, 2),
        other => other,
    }
}

/// The component identifier for a doc unit.
///
/// The file stem, unless the file is an `index.*` entry, in which case the
/// owning directory names the component.
pub fn component_name(location: &str) -> Result<String, NamingError> {
    let stem = file_name(location)?;
    if stem == "index" {
        return owning_folder(location)
            .ok_or_else(|| NamingError::BadLocation(location.to_string()));
    }
    Ok(stem)
}

/// Insert a single space before every uppercase letter that is not the
/// first character: `AboutModal` → `About Modal`.
///
/// Pure and locale-free; case is otherwise unchanged.
pub fn humanize(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}

/// The navigation section: front-matter's value when present and non-empty,
/// else [`DEFAULT_SECTION`]. Any string is accepted.
pub fn resolve_section(section: Option<&str>) -> String {
    match section {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_SECTION.to_string(),
    }
}
