//! Asset pipeline configuration.
//!
//! The static description of how non-page sources are handled during
//! generation: which loader owns each file extension, how logical import
//! aliases resolve against the site directory, and how stylesheets are
//! chunked per build stage. Assembled from config once per run; the
//! partials map is injected here rather than read from a global.

use crate::config::SiteConfig;
use crate::partials::{self, LazyPartials, PartialsError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Build stage the pipeline is configured for.
///
/// The only stage-dependent behavior is style chunking: Production gathers
/// every stylesheet into one `styles.css` bundle, Develop copies them
/// individually for debuggability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Develop,
    Production,
}

/// Loader owning one source extension.
#[derive(Debug, Clone, Serialize)]
pub struct LoaderRule {
    pub extension: &'static str,
    pub loader: &'static str,
}

/// Module rules, keyed by extension.
pub const LOADER_RULES: &[LoaderRule] = &[
    LoaderRule {
        extension: "md",
        loader: "markdown",
    },
    LoaderRule {
        extension: "hbs",
        loader: "handlebars",
    },
    LoaderRule {
        extension: "css",
        loader: "style",
    },
];

/// Extensions gathered by the style chunking rule.
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];

/// The configured pipeline handed to the generate stage.
pub struct AssetPipeline<'a> {
    pub stage: Stage,
    aliases: BTreeMap<String, PathBuf>,
    style_dirs: Vec<String>,
    partials: &'a LazyPartials,
}

impl<'a> AssetPipeline<'a> {
    /// Assemble the pipeline for one run.
    pub fn configure(
        stage: Stage,
        config: &SiteConfig,
        site_dir: &Path,
        partials: &'a LazyPartials,
    ) -> Self {
        let aliases = config
            .aliases
            .iter()
            .map(|(alias, dir)| (alias.clone(), site_dir.join(dir)))
            .collect();
        Self {
            stage,
            aliases,
            style_dirs: config.assets.style_dirs.clone(),
            partials,
        }
    }

    /// The loader owning a source file, by extension.
    pub fn loader_for(&self, path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        LOADER_RULES
            .iter()
            .find(|rule| rule.extension == ext)
            .map(|rule| rule.loader)
    }

    /// Resolve an aliased reference like `@components/Button/button.hbs`
    /// to its physical location.
    pub fn resolve_alias(&self, reference: &str) -> Option<PathBuf> {
        let (alias, rest) = match reference.split_once('/') {
            Some((alias, rest)) => (alias, Some(rest)),
            None => (reference, None),
        };
        let base = self.aliases.get(alias)?;
        Some(match rest {
            Some(rest) => base.join(rest),
            None => base.clone(),
        })
    }

    /// Expand `{{> name}}` references through the injected partials map.
    ///
    /// The map is built on the first expansion of the run; a failed lookup
    /// is fatal to this one asset only.
    pub fn expand_template(&self, source: &str) -> Result<String, PartialsError> {
        let map = self.partials.get_or_build()?;
        partials::expand(source, map)
    }

    /// Whether a source file joins the style output: a stylesheet extension
    /// under one of the configured style directories.
    pub fn is_style_source(&self, path: &Path) -> bool {
        let is_stylesheet = path
            .extension()
            .map(|e| {
                let ext = e.to_string_lossy().to_lowercase();
                STYLE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false);
        if !is_stylesheet {
            return false;
        }
        path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            self.style_dirs.iter().any(|d| d == name.as_ref())
        })
    }

    /// Style chunking applies to the production build stage only.
    pub fn bundles_styles(&self) -> bool {
        self.stage == Stage::Production
    }
}
