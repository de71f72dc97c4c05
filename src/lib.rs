// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod docx;
pub mod error;
pub mod models;
pub mod processing;
pub mod server;
pub mod utils;

pub use config::{Config, PreviewConfig, ProcessingConfig, ServerConfig};
pub use docx::{DocumentHandle, DocxDocument, DocxPackage, ParagraphHandle};
pub use error::{FormatterError, PreviewError, Result};
pub use models::{ErrorResponse, ProcessResponse, ProcessedDocument};
pub use processing::{
    DocumentProcessor, FilterStats, FilteredDocument, ParagraphFilter, PreviewRenderer, filter,
};
pub use server::{AppState, build_router, serve};
pub use utils::Validator;
