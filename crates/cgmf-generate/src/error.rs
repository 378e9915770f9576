//! Error types for deck generation.

use std::path::PathBuf;
use thiserror::Error;

use cgmf_codec::CodecError;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Baseline or output directory missing.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Scale configuration failed validation.
    #[error("invalid scale configuration: {message}")]
    Config { message: String },

    /// Manifest failed validation.
    #[error("invalid manifest: {message}")]
    Manifest { message: String },

    /// A codec rejected a parameter file.
    #[error("{file}: {source}")]
    Codec { file: PathBuf, source: CodecError },

    /// Failed to parse a JSON configuration file.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// CSV read/write failure.
    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

impl GenerateError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }
}
