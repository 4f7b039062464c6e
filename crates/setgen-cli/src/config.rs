//! # Configuration
//!
//! `setgen.yaml` names the schema, the version to stamp, and where each
//! output goes:
//!
//! ```yaml
//! schema: schemas/settings.yaml
//! version: "3.6"
//! wrap_width: 80
//! header:
//!   path: src/Settings.h
//!   marker: "// ----- generated below -----"
//!   formatter: [clang-format, -i]
//! text_doc:
//!   path: docs/settings.txt
//!   marker: "; ----- generated below -----"
//! html_doc:
//!   path: docs/settings.html
//!   title: Settings
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file. Every output is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use setgen_codegen::DEFAULT_GUARD;
use setgen_docs::DEFAULT_WIDTH;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub schema: PathBuf,
    pub version: String,
    #[serde(default = "default_width")]
    pub wrap_width: usize,
    #[serde(default)]
    pub header: Option<HeaderOutput>,
    #[serde(default)]
    pub text_doc: Option<TextDocOutput>,
    #[serde(default)]
    pub html_doc: Option<HtmlDocOutput>,
}

/// Header file receiving struct definitions and metadata after `marker`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderOutput {
    pub path: PathBuf,
    pub marker: String,
    #[serde(default = "default_guard")]
    pub guard: String,
    /// Command run with the header path appended after writing.
    #[serde(default)]
    pub formatter: Option<Vec<String>>,
}

/// Text page receiving the plain documentation after `marker`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextDocOutput {
    pub path: PathBuf,
    pub marker: String,
}

/// Standalone HTML page, written whole.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlDocOutput {
    pub path: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_guard() -> String {
    DEFAULT_GUARD.to_string()
}

fn default_title() -> String {
    "Settings".to_string()
}

impl Config {
    /// Read `path` and resolve every relative path against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        let base = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.schema = resolve(base, &self.schema);
        if let Some(header) = &mut self.header {
            header.path = resolve(base, &header.path);
        }
        if let Some(text) = &mut self.text_doc {
            text.path = resolve(base, &text.path);
        }
        if let Some(html) = &mut self.html_doc {
            html.path = resolve(base, &html.path);
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
