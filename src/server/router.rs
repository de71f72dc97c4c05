// file: src/server/router.rs
// description: route table and shared state for the http server
// reference: https://docs.rs/axum

use crate::config::Config;
use crate::processing::DocumentProcessor;
use crate::server::handlers;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;

/// Immutable per-process state; each request works on its own buffers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<DocumentProcessor>,
    pub allowed_extension: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            processor: Arc::new(DocumentProcessor::new(config)),
            allowed_extension: Arc::from(config.processing.allowed_extension.as_str()),
        }
    }
}

pub fn build_router(config: &Config) -> Router {
    Router::new()
        .route("/process-document", post(handlers::process_document))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes()))
        .with_state(AppState::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::DocxDocument;
    use crate::docx::fixtures::DocxFixture;
    use crate::models::{ErrorResponse, ProcessResponse};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use pretty_assertions::assert_eq;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    const BOUNDARY: &str = "docx-formatter-test-boundary";

    enum Part<'a> {
        File { filename: &'a str, content: &'a [u8] },
        Text { name: &'a str, value: &'a str },
    }

    fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File { filename, content } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                            filename
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                            name, value
                        )
                        .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/process-document")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> Response {
        send_with(&Config::default_config(), request).await
    }

    async fn send_with(config: &Config, request: Request<Body>) -> Response {
        build_router(config).oneshot(request).await.unwrap()
    }

    async fn json_body<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn processes_docx_upload() {
        let docx = DocxFixture::new()
            .paragraphs(&["", "Hello world", "DRAFT - remove me", "Goodbye"])
            .build();

        let response = send(multipart_request(&[
            Part::File {
                filename: "report.docx",
                content: &docx,
            },
            Part::Text {
                name: "format_text",
                value: "draft",
            },
        ]))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ProcessResponse = json_body(response).await;
        assert_eq!(body.html_content, "<p>Hello world</p><p>Goodbye</p>");

        let decoded = STANDARD.decode(body.docx_base64).unwrap();
        assert_eq!(
            DocxDocument::from_bytes(&decoded).unwrap().paragraph_texts(),
            vec!["Hello world", "Goodbye"]
        );
    }

    #[tokio::test]
    async fn filter_field_may_precede_file() {
        let docx = DocxFixture::new()
            .paragraphs(&["Keep", "Confidential Draft"])
            .build();

        let response = send(multipart_request(&[
            Part::Text {
                name: "format_text",
                value: "confidential",
            },
            Part::File {
                filename: "memo.docx",
                content: &docx,
            },
        ]))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ProcessResponse = json_body(response).await;
        assert_eq!(body.html_content, "<p>Keep</p>");
    }

    #[tokio::test]
    async fn missing_filter_only_drops_empty_paragraphs() {
        let docx = DocxFixture::new().paragraphs(&["A", "", "B"]).build();

        let response = send(multipart_request(&[Part::File {
            filename: "notes.docx",
            content: &docx,
        }]))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ProcessResponse = json_body(response).await;
        assert_eq!(body.html_content, "<p>A</p><p>B</p>");
    }

    #[tokio::test]
    async fn rejects_wrong_extension() {
        let response = send(multipart_request(&[Part::File {
            filename: "report.txt",
            content: b"plain text",
        }]))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response).await;
        assert!(body.error.contains(".docx"));
    }

    #[tokio::test]
    async fn rejects_empty_filename() {
        let response = send(multipart_request(&[Part::File {
            filename: "",
            content: b"ignored",
        }]))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Invalid file name");
    }

    #[tokio::test]
    async fn rejects_missing_file() {
        let response = send(multipart_request(&[Part::Text {
            name: "format_text",
            value: "draft",
        }]))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "No file found in the request");
    }

    #[tokio::test]
    async fn unparseable_docx_is_server_error() {
        let response = send(multipart_request(&[Part::File {
            filename: "broken.docx",
            content: b"this is not a zip package",
        }]))
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = json_body(response).await;
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|message| !message.is_empty())
        );
        assert!(body.get("docx_base64").is_none());
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let mut config = Config::default_config();
        config.server.max_upload_mb = 1;
        let content = vec![b'a'; 1_048_576 + 4096];

        let response = send_with(
            &config,
            multipart_request(&[Part::File {
                filename: "huge.docx",
                content: &content,
            }]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: serde_json::Value = json_body(response).await;
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|message| !message.is_empty())
        );
    }

    #[tokio::test]
    async fn health_check_responds() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
