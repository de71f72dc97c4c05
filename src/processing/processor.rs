// file: src/processing/processor.rs
// description: filters an uploaded document and renders the preview of the result
// reference: filter -> serialize -> preview -> encode

use crate::config::Config;
use crate::docx::package::DEFAULT_MAX_UNPACKED_BYTES;
use crate::error::Result;
use crate::models::ProcessedDocument;
use crate::processing::{ParagraphFilter, PreviewRenderer};
use tracing::info;

#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    preview: PreviewRenderer,
    max_unpacked_bytes: usize,
}

impl DocumentProcessor {
    pub fn new(config: &Config) -> Self {
        let max_unpacked_bytes = config.processing.max_unpacked_bytes();
        Self {
            preview: PreviewRenderer::new(config.preview.escape_html)
                .with_unpacked_limit(max_unpacked_bytes),
            max_unpacked_bytes,
        }
    }

    /// Preview rendering never fails the whole operation; only filtering can.
    pub fn process(
        &self,
        document_bytes: &[u8],
        text_to_remove: Option<&str>,
    ) -> Result<ProcessedDocument> {
        let filtered = ParagraphFilter::new(text_to_remove)
            .with_unpacked_limit(self.max_unpacked_bytes)
            .filter_bytes(document_bytes)?;
        let html_content = self.preview.render(&filtered.bytes);
        let processed = ProcessedDocument::new(filtered.bytes, html_content, filtered.stats);

        info!(
            "Processed document: {} of {} paragraphs removed, {} bytes out (sha256 {})",
            processed.stats.removed(),
            processed.stats.total,
            processed.bytes.len(),
            processed.content_hash
        );

        Ok(processed)
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self {
            preview: PreviewRenderer::default(),
            max_unpacked_bytes: DEFAULT_MAX_UNPACKED_BYTES,
        }
    }
}
