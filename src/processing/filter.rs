// file: src/processing/filter.rs
// description: removes empty paragraphs and paragraphs containing the filter text
// reference: two-pass classify-then-detach over a DocumentHandle

use crate::docx::package::DEFAULT_MAX_UNPACKED_BYTES;
use crate::docx::{DocumentHandle, DocxDocument, ParagraphHandle};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub total: usize,
    pub removed_empty: usize,
    pub removed_matching: usize,
    pub kept: usize,
}

impl FilterStats {
    pub fn removed(&self) -> usize {
        self.removed_empty + self.removed_matching
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    Empty,
    Matching,
}

#[derive(Debug)]
pub struct FilteredDocument {
    pub bytes: Vec<u8>,
    pub stats: FilterStats,
}

/// Case-insensitive substring filter over trimmed paragraph text.
///
/// Empty paragraphs are always removed. An absent or empty filter string
/// disables substring matching.
#[derive(Debug, Clone)]
pub struct ParagraphFilter {
    needle: Option<String>,
    max_unpacked_bytes: usize,
}

impl ParagraphFilter {
    pub fn new(text_to_remove: Option<&str>) -> Self {
        let needle = text_to_remove
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        Self {
            needle,
            max_unpacked_bytes: DEFAULT_MAX_UNPACKED_BYTES,
        }
    }

    /// Caps the decompressed size of the package read by [`filter_bytes`](Self::filter_bytes).
    pub fn with_unpacked_limit(mut self, max_unpacked_bytes: usize) -> Self {
        self.max_unpacked_bytes = max_unpacked_bytes;
        self
    }

    pub fn should_remove(&self, text: &str) -> bool {
        self.classify(text).is_some()
    }

    fn classify(&self, text: &str) -> Option<Removal> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Some(Removal::Empty);
        }

        match &self.needle {
            Some(needle) if trimmed.to_lowercase().contains(needle.as_str()) => {
                Some(Removal::Matching)
            }
            _ => None,
        }
    }

    /// Classifies every paragraph first, then detaches the marked ones.
    pub fn apply<D: DocumentHandle>(&self, document: &mut D) -> Result<FilterStats> {
        let paragraphs = document.list_paragraphs();
        let mut stats = FilterStats {
            total: paragraphs.len(),
            ..FilterStats::default()
        };

        let marked: Vec<(&ParagraphHandle, Removal)> = paragraphs
            .iter()
            .filter_map(|p| self.classify(&p.text).map(|reason| (p, reason)))
            .collect();

        for (paragraph, reason) in marked {
            document.remove_paragraph(paragraph)?;
            match reason {
                Removal::Empty => stats.removed_empty += 1,
                Removal::Matching => stats.removed_matching += 1,
            }
        }

        stats.kept = stats.total - stats.removed();
        debug!(
            "Filtered {} paragraphs: {} empty, {} matching, {} kept",
            stats.total, stats.removed_empty, stats.removed_matching, stats.kept
        );

        Ok(stats)
    }

    /// Parses `document_bytes`, filters it and serializes the result.
    pub fn filter_bytes(&self, document_bytes: &[u8]) -> Result<FilteredDocument> {
        let mut document =
            DocxDocument::from_bytes_with_limit(document_bytes, self.max_unpacked_bytes)?;
        let stats = self.apply(&mut document)?;
        let bytes = document.to_bytes()?;

        Ok(FilteredDocument { bytes, stats })
    }
}

impl Default for ParagraphFilter {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Filters a serialized document, returning the serialized result.
pub fn filter(document_bytes: &[u8], text_to_remove: Option<&str>) -> Result<Vec<u8>> {
    ParagraphFilter::new(text_to_remove)
        .filter_bytes(document_bytes)
        .map(|filtered| filtered.bytes)
}
