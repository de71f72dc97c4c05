// file: src/utils/validation.rs
// description: upload and configuration validation helpers
// reference: input validation patterns

use crate::error::{FormatterError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Checks an uploaded filename: it must be non-empty and carry the expected suffix.
    pub fn validate_upload_filename(filename: &str, extension: &str) -> Result<()> {
        if filename.is_empty() {
            return Err(FormatterError::Validation("Invalid file name".to_string()));
        }

        if !filename.ends_with(extension) {
            return Err(FormatterError::Validation(format!(
                "Unsupported file type. Please upload a {} file",
                extension
            )));
        }

        Ok(())
    }

    pub fn validate_document_path(path: &Path, extension: &str) -> Result<()> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Self::validate_upload_filename(name, extension)?;

        if !path.is_file() {
            return Err(FormatterError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(FormatterError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        match text.char_indices().nth(max_length) {
            Some((index, _)) => format!("{}...", &text[..index]),
            None => text.to_string(),
        }
    }
}
