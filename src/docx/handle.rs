// file: src/docx/handle.rs
// description: paragraph-level capability over a loaded document
// reference: python-docx paragraph enumeration, expressed as a trait

use crate::error::Result;

/// A body paragraph as seen by callers: a stable id and its extracted text.
///
/// The id is assigned when the document is loaded and does not shift when
/// other paragraphs are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphHandle {
    pub id: usize,
    pub text: String,
}

pub trait DocumentHandle {
    /// Body paragraphs in document order.
    fn list_paragraphs(&self) -> Vec<ParagraphHandle>;

    /// Detaches the paragraph from its parent container.
    fn remove_paragraph(&mut self, paragraph: &ParagraphHandle) -> Result<()>;
}
