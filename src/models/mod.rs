// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod processed;
pub mod response;

pub use processed::ProcessedDocument;
pub use response::{ErrorResponse, ProcessResponse};
