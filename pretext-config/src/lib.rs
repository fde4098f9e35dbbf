//! Configuration loading for the pretext toolchain.
//!
//! Every binary embeds `defaults/pretext.default.toml` so documentation
//! and runtime behavior stay in sync. On top of the defaults, [`Loader`]
//! layers `pretext.toml` from the working directory (when present), then
//! an explicitly named `--config` file, then per-flag overrides, before
//! deserializing into [`PretextConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, Source, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pretext.default.toml");

/// Per-project override file picked up from the working directory.
pub const PROJECT_FILE: &str = "pretext.toml";

/// Top-level configuration consumed by the pretext binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct PretextConfig {
    pub processor: ProcessorSection,
    pub scraper: ScraperSection,
    pub trim: TrimSection,
}

/// Knobs for the tag-driven line processor.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorSection {
    pub comment_sentinel: String,
    pub clear_on_deposit: bool,
}

/// Token-classification rules for the vocabulary scraper.
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSection {
    pub excluded_suffixes: Vec<String>,
    pub min_token_length: usize,
}

/// Knobs for the grammar trimmer.
#[derive(Debug, Clone, Deserialize)]
pub struct TrimSection {
    pub remove_comments: bool,
    pub indent: String,
}

/// Builds a [`PretextConfig`] by stacking sources over the embedded
/// defaults. Later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults.
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
        .add(File::from_str(DEFAULT_TOML, FileFormat::Toml))
    }

    /// Layer `pretext.toml` from the working directory; absent is fine.
    pub fn with_project_file(self) -> Self {
        self.add(File::new(PROJECT_FILE, FileFormat::Toml).required(false))
    }

    /// Layer an explicitly named configuration file. Unlike the project
    /// file, a named file must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(true),
        )
    }

    /// Force a single key, used to map CLI flags onto the configuration.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Resolve the stack and deserialize.
    pub fn build(self) -> Result<PretextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn add<S>(mut self, source: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PretextConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.processor.comment_sentinel, "%%ptcomment");
        assert!(!config.processor.clear_on_deposit);
        assert_eq!(config.scraper.excluded_suffixes, vec!["_name", "_text"]);
        assert_eq!(config.scraper.min_token_length, 2);
        assert!(!config.trim.remove_comments);
        assert_eq!(config.trim.indent, "    ");
    }

    #[test]
    fn missing_project_file_falls_back_to_defaults() {
        let config = Loader::new()
            .with_project_file()
            .build()
            .expect("absent project file is not an error");
        assert_eq!(config.trim.indent, "    ");
    }

    #[test]
    fn named_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[trim]\nindent = \"  \"").expect("write override");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.trim.indent, "  ");
        // untouched sections keep their defaults
        assert_eq!(config.scraper.min_token_length, 2);
    }

    #[test]
    fn missing_named_file_is_an_error() {
        let result = Loader::new().with_file("no-such-pretext.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn flag_overrides_win_over_files() {
        let config = Loader::new()
            .set_override("trim.remove_comments", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.trim.remove_comments);
    }
}
