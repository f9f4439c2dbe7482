//! Configuration loading for the population browser.
//!
//! The browser reads a small YAML file. Every field has a default, so an
//! empty document is a valid configuration.
//!
//! ```yaml
//! snapshots:
//!   directory: runs/latest/populations
//!   extension: json
//!   max_document_bytes: 67108864
//! ```

use std::path::{Path, PathBuf};

use genepool_store::FileSnapshotStore;
use genepool_store::file::{DEFAULT_EXTENSION, DEFAULT_MAX_DOCUMENT_BYTES};
use serde::Deserialize;

/// Environment variable overriding `snapshots.directory`.
pub const SNAPSHOT_DIR_ENV: &str = "GENEPOOL_SNAPSHOT_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level browser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrowserConfig {
    /// Where snapshots live and how they are read.
    #[serde(default)]
    pub snapshots: SnapshotConfig,
}

impl BrowserConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `GENEPOOL_SNAPSHOT_DIR` overrides `snapshots.directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.snapshots
            .apply_directory_override(std::env::var(SNAPSHOT_DIR_ENV).ok());
    }

    /// Build a file store from the snapshot settings.
    pub fn file_store(&self) -> FileSnapshotStore {
        FileSnapshotStore::new(self.snapshots.directory.clone())
            .with_extension(self.snapshots.extension.clone())
            .with_max_document_bytes(self.snapshots.max_document_bytes)
    }
}

/// Snapshot directory settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotConfig {
    /// Directory the evolution run writes snapshots into.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File extension of snapshot documents.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Documents larger than this are rejected without parsing.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
}

impl SnapshotConfig {
    fn apply_directory_override(&mut self, directory: Option<String>) {
        if let Some(dir) = directory.filter(|d| !d.is_empty()) {
            self.directory = PathBuf::from(dir);
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extension: default_extension(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("populations")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

const fn default_max_document_bytes() -> u64 {
    DEFAULT_MAX_DOCUMENT_BYTES
}
