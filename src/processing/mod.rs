// file: src/processing/mod.rs
// description: paragraph filtering, preview rendering and their composition
// reference: internal module structure

pub mod filter;
pub mod preview;
pub mod processor;

pub use filter::{FilterStats, FilteredDocument, ParagraphFilter, filter};
pub use preview::PreviewRenderer;
pub use processor::DocumentProcessor;
