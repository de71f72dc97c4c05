// file: src/models/response.rs
// description: json bodies returned by the http endpoint

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub html_content: String,
    pub docx_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
