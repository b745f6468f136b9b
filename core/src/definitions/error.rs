//! Error types for definition loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during definition file loading and reload.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definition TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write definition file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid definition in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
