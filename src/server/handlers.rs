// file: src/server/handlers.rs
// description: multipart upload handler for POST /process-document
// reference: https://docs.rs/axum/latest/axum/extract/struct.Multipart.html

use crate::error::FormatterError;
use crate::models::{ErrorResponse, ProcessResponse, ProcessedDocument};
use crate::server::router::AppState;
use crate::utils::Validator;
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

pub const FILE_FIELD: &str = "file";
pub const FILTER_FIELD: &str = "format_text";

const PROCESSING_FAILED: &str = "Internal error while processing the document.";
const MISSING_FILE: &str = "No file found in the request";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<FormatterError> for ApiError {
    fn from(err: FormatterError) -> Self {
        match err {
            FormatterError::Validation(message) => Self::bad_request(message),
            other => {
                error!("Document processing failed: {}", other);
                Self::internal(PROCESSING_FAILED)
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        warn!("Rejected multipart body: {}", err);
        Self::new(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

pub async fn process_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let span = info_span!("process_document", request_id = %Uuid::new_v4());
    handle_upload(state, multipart).instrument(span).await
}

async fn handle_upload(
    state: AppState,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut upload: Option<Upload> = None;
    let mut text_to_remove = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FILE_FIELD if upload.is_none() => {
                // A part without a filename is a plain form value, not a file.
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                Validator::validate_upload_filename(&filename, &state.allowed_extension)?;

                let bytes = field.bytes().await?;
                upload = Some(Upload { filename, bytes });
            }
            FILTER_FIELD => {
                text_to_remove = field.text().await?;
            }
            _ => {}
        }
    }

    let Upload { filename, bytes } = upload.ok_or_else(|| ApiError::bad_request(MISSING_FILE))?;

    info!(
        filename = %filename,
        size = bytes.len(),
        filter = %Validator::truncate_text(&text_to_remove, 40),
        "Processing uploaded document"
    );

    let processor = Arc::clone(&state.processor);
    let outcome = tokio::task::spawn_blocking(move || {
        processor.process(&bytes, Some(text_to_remove.as_str()))
    })
    .await;

    finish_processing(outcome)
}

/// A task that panicked or was cancelled answers 500 with the failure text.
fn finish_processing(
    outcome: Result<crate::Result<ProcessedDocument>, JoinError>,
) -> Result<Json<ProcessResponse>, ApiError> {
    match outcome {
        Ok(Ok(processed)) => Ok(Json(processed.to_response())),
        Ok(Err(e)) => Err(ApiError::from(e)),
        Err(e) => {
            error!("Processing task failed: {}", e);
            Err(ApiError::internal(e.to_string()))
        }
    }
}
