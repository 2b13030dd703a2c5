//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! sparse: stock defaults are overridden by whatever keys the site's
//! `config.toml` provides, and unknown keys are rejected to catch typos
//! early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [sources]
//! react_root = "sources/react"    # Component documentation markdown
//! core_root = "sources/core"      # Core library example entries
//! content_root = "content"        # Standalone markdown pages
//!
//! [partials]
//! root = "sources/core/src"       # Tree searched for *.hbs partials
//!
//! # Logical import aliases resolved against the site directory
//! [aliases]
//! "@components" = "sources/core/src/components"
//! "@layouts" = "sources/core/src/layouts"
//!
//! [assets]
//! # Directories whose stylesheets join the production styles bundle
//! style_dirs = ["components", "layouts", "utilities"]
//!
//! # Browser-side redirects, registered verbatim at startup
//! [[redirects]]
//! from = "/documentation"
//! to = "/documentation/react/components/aboutmodal"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. The config file need only specify
/// the values it wants to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content source tree locations, relative to the site directory.
    pub sources: SourcesConfig,
    /// Template partial discovery settings.
    pub partials: PartialsConfig,
    /// Logical alias → directory, resolved against the site directory.
    pub aliases: BTreeMap<String, String>,
    /// Asset pipeline settings.
    pub assets: AssetsConfig,
    /// Browser-side redirects registered verbatim at startup.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<Redirect>,
}

/// Content source tree locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Root of the framework component documentation markdown.
    pub react_root: String,
    /// Root of the core library example entries.
    pub core_root: String,
    /// Root of the standalone markdown content pages.
    pub content_root: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            react_root: "sources/react".to_string(),
            core_root: "sources/core".to_string(),
            content_root: "content".to_string(),
        }
    }
}

/// Template partial discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialsConfig {
    /// Tree searched for `*.hbs` partial files (examples dirs skipped).
    pub root: String,
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            root: "sources/core/src".to_string(),
        }
    }
}

/// Asset pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory names whose stylesheets are gathered into the single
    /// production styles bundle.
    pub style_dirs: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            style_dirs: vec![
                "components".to_string(),
                "layouts".to_string(),
                "utilities".to_string(),
            ],
        }
    }
}

/// One browser-side redirect pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, root) in [
            ("sources.react_root", &self.sources.react_root),
            ("sources.core_root", &self.sources.core_root),
            ("sources.content_root", &self.sources.content_root),
            ("partials.root", &self.partials.root),
        ] {
            if root.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name} must not be empty"
                )));
            }
        }
        for redirect in &self.redirects {
            if !redirect.from.starts_with('/') || !redirect.to.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "redirect paths must start with '/': {} -> {}",
                    redirect.from, redirect.to
                )));
            }
        }
        for (alias, dir) in &self.aliases {
            if dir.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "alias {alias} must map to a directory"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Resolve the fully-merged config from an optional overlay value.
fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the site directory, falling back to stock
/// defaults when no file exists.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = site_dir.join("config.toml");
    if !config_path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(overlay))
}

/// The stock config.toml with all options documented.
pub fn stock_config_toml() -> &'static str {
    r#"# simple-docs configuration
# All options are optional - defaults shown below.

[sources]
# Component documentation markdown tree
react_root = "sources/react"
# Core library example entries (examples/index.js)
core_root = "sources/core"
# Standalone markdown pages with an explicit `path` front-matter field
content_root = "content"

[partials]
# Tree searched for *.hbs template partials (examples dirs are skipped)
root = "sources/core/src"

# Logical import aliases, resolved against the site directory.
# [aliases]
# "@components" = "sources/core/src/components"
# "@layouts" = "sources/core/src/layouts"

[assets]
# Directories whose stylesheets join the single production styles bundle
style_dirs = ["components", "layouts", "utilities"]

# Browser-side redirects, registered verbatim at startup.
# [[redirects]]
# from = "/documentation"
# to = "/documentation/react/components/aboutmodal"
"#
}
