// file: src/processing/preview.rs
// description: renders document paragraphs as an html preview
// reference: https://docs.rs/html-escape

use crate::docx::package::DEFAULT_MAX_UNPACKED_BYTES;
use crate::docx::{DocumentHandle, DocxDocument};
use crate::error::PreviewError;
use tracing::warn;

const LINE_BREAK: &str = "<br/>";

#[derive(Debug, Clone, Copy)]
pub struct PreviewRenderer {
    escape_html: bool,
    max_unpacked_bytes: usize,
}

impl PreviewRenderer {
    /// With `escape_html` off, paragraph text is inserted into the markup verbatim.
    pub fn new(escape_html: bool) -> Self {
        Self {
            escape_html,
            max_unpacked_bytes: DEFAULT_MAX_UNPACKED_BYTES,
        }
    }

    pub fn with_unpacked_limit(mut self, max_unpacked_bytes: usize) -> Self {
        self.max_unpacked_bytes = max_unpacked_bytes;
        self
    }

    /// One `<p>` per paragraph, `\n` rendered as `<br/>`, no separator between paragraphs.
    pub fn try_render(&self, document_bytes: &[u8]) -> Result<String, PreviewError> {
        let document =
            DocxDocument::from_bytes_with_limit(document_bytes, self.max_unpacked_bytes)?;
        let paragraphs = document.list_paragraphs();

        let mut html = String::new();
        for paragraph in &paragraphs {
            self.render_paragraph(&paragraph.text, &mut html);
        }

        Ok(html)
    }

    /// Like [`try_render`](Self::try_render), but a failure becomes the returned text.
    pub fn render(&self, document_bytes: &[u8]) -> String {
        match self.try_render(document_bytes) {
            Ok(html) => html,
            Err(e) => {
                warn!("Preview generation failed: {}", e);
                format!("Error generating preview: {}", e)
            }
        }
    }

    fn render_paragraph(&self, text: &str, html: &mut String) {
        html.push_str("<p>");
        if self.escape_html {
            html.push_str(&html_escape::encode_text(text).replace('\n', LINE_BREAK));
        } else {
            html.push_str(&text.replace('\n', LINE_BREAK));
        }
        html.push_str("</p>");
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}
