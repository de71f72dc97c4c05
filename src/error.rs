// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatterError>;

/// Preview rendering shares the crate error; the name documents intent at call sites.
pub type PreviewError = FormatterError;

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document parse error: {0}")]
    Parse(String),

    #[error("Document processing error: {0}")]
    Processing(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatterError {
    /// True when the caller supplied bad input, as opposed to the document failing to process.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
