//! Configuration loading
//!
//! `defaults/physmac.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Callers layer their own files on top of those
//! defaults via [`Loader`] before deserializing into [`PhysmacConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/physmac.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhysmacConfig {
    pub expansion: ExpansionConfig,
    pub notation: NotationConfig,
}

/// Knobs of the host expansion loop.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    pub max_expansions: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            max_expansions: crate::expander::DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Knobs of the physics notation rules.
#[derive(Debug, Clone, Deserialize)]
pub struct NotationConfig {
    pub matrix_fill: String,
    pub close_at_end_of_input: bool,
    /// Largest row or column count a matrix builder accepts.
    pub max_matrix_size: usize,
}

impl Default for NotationConfig {
    fn default() -> Self {
        NotationConfig {
            matrix_fill: "0".to_string(),
            close_at_end_of_input: false,
            max_matrix_size: 64,
        }
    }
}

/// File looked up in the working directory by the command-line tool.
pub const PROJECT_FILE: &str = ".physmac.toml";

/// Builds a [`PhysmacConfig`] from the embedded defaults plus any number of
/// TOML layers. Later layers win key by key, so a file only needs the
/// `[expansion]` or `[notation]` keys it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a notation file named explicitly by the caller; it must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a file that may be absent, such as [`PROJECT_FILE`].
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Set one dotted key, e.g. `notation.max_matrix_size`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PhysmacConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<PhysmacConfig, ConfigError> {
    Loader::new().build()
}
