//! `knit.toml` configuration.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//! Command-line flags are applied on top by the binary.

use crate::render::RenderOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "knit.toml";

const DEFAULT_DIRECTORY: &str = "src/main/resources/dwl";
/// Output path without extension; the renderer supplies the extension.
const DEFAULT_OUTPUT_STEM: &str = "target/knit-doc";
const DEFAULT_FILE_EXT: &str = "dwl";
const DEFAULT_FORMAT: &str = "markdown";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnitConfig {
    /// Do nothing when set
    pub skip: bool,
    /// Explicit input files, relative to the working directory
    pub files: Vec<String>,
    /// Directories walked recursively for `*.<file_ext>`
    pub directories: Vec<String>,
    /// Defaults to `target/knit-doc.<format extension>`
    pub output_file: Option<String>,
    pub output_header_text: String,
    pub output_footer_text: String,
    pub write_header_table: bool,
    /// Custom module order for the output
    pub module_list: Vec<String>,
    pub file_ext: String,
    pub show_about: bool,
    /// `markdown` or `json`
    pub format: String,
}

impl Default for KnitConfig {
    fn default() -> Self {
        Self {
            skip: false,
            files: Vec::new(),
            directories: vec![DEFAULT_DIRECTORY.to_string()],
            output_file: None,
            output_header_text: String::new(),
            output_footer_text: String::new(),
            write_header_table: false,
            module_list: Vec::new(),
            file_ext: DEFAULT_FILE_EXT.to_string(),
            show_about: false,
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl KnitConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid knit configuration")
    }

    /// Load a configuration file; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load `explicit` if given, else `<root>/knit.toml` if present, else defaults.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = root.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading configuration");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Configured output file, or the default path with extension `ext`.
    pub fn output_path(&self, ext: &str) -> String {
        match self.output_file {
            Some(ref path) => path.clone(),
            None => format!("{}.{}", DEFAULT_OUTPUT_STEM, ext),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            header_text: self.output_header_text.clone(),
            footer_text: self.output_footer_text.clone(),
            header_table: self.write_header_table,
            module_list: self.module_list.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(KnitConfig::from_toml("").unwrap(), KnitConfig::default());
    }

    #[test]
    fn defaults_match_plugin() {
        let config = KnitConfig::default();
        assert_eq!(config.directories, vec!["src/main/resources/dwl"]);
        assert_eq!(config.output_file, None);
        assert_eq!(config.output_path("md"), "target/knit-doc.md");
        assert_eq!(config.output_path("json"), "target/knit-doc.json");
        assert_eq!(config.file_ext, "dwl");
        assert!(!config.skip);
    }

    #[test]
    fn partial_override() {
        let config = KnitConfig::from_toml(
            "output_file = \"docs/api.md\"\nmodule_list = [\"b\", \"a\"]\nwrite_header_table = true\n",
        )
        .unwrap();
        assert_eq!(config.output_file.as_deref(), Some("docs/api.md"));
        assert_eq!(config.output_path("json"), "docs/api.md");
        assert_eq!(config.module_list, vec!["b", "a"]);
        assert!(config.write_header_table);
        assert_eq!(config.file_ext, "dwl");
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(KnitConfig::from_toml("outputFile = \"x\"").is_err());
    }

    #[test]
    fn resolve_prefers_root_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "file_ext = \"dw\"\n").unwrap();
        let config = KnitConfig::resolve(dir.path(), None).unwrap();
        assert_eq!(config.file_ext, "dw");
    }

    #[test]
    fn resolve_without_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            KnitConfig::resolve(dir.path(), None).unwrap(),
            KnitConfig::default()
        );
    }

    #[test]
    fn explicit_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let err = KnitConfig::resolve(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
