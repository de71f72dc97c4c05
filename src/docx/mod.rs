// file: src/docx/mod.rs
// description: .docx container loading, paragraph access and re-serialization
// reference: internal module structure

pub mod document;
pub mod handle;
pub mod package;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::DocxDocument;
pub use handle::{DocumentHandle, ParagraphHandle};
pub use package::DocxPackage;
