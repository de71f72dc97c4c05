// file: src/models/processed.rs
// description: result of filtering one uploaded document
// reference: internal data structures

use crate::models::response::ProcessResponse;
use crate::processing::FilterStats;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub bytes: Vec<u8>,
    pub html_content: String,
    pub stats: FilterStats,
    pub content_hash: String,
}

impl ProcessedDocument {
    pub fn new(bytes: Vec<u8>, html_content: String, stats: FilterStats) -> Self {
        let content_hash = Self::compute_hash(&bytes);

        Self {
            bytes,
            html_content,
            stats,
            content_hash,
        }
    }

    fn compute_hash(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_response(&self) -> ProcessResponse {
        ProcessResponse {
            html_content: self.html_content.clone(),
            docx_base64: self.to_base64(),
        }
    }
}
