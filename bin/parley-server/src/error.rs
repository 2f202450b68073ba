//! Unified request-lifecycle error type.
//!
//! Every handler returns `Result<T, ApiError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Internal errors (extraction, gateway) are logged with full detail but
//! only a short generic message is returned to the caller so that decoder
//! internals or backend responses never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::extract::ExtractError;
use crate::gateway::GatewayError;

/// All errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent an invalid or missing field.
    #[error("{0}")]
    Validation(String),

    /// The uploaded file's extension is not one of `.txt`, `.pdf`, `.docx`.
    #[error("Unsupported file format. Please upload a .txt, .pdf, or .docx file.")]
    UnsupportedFormat,

    /// A query arrived before any document was uploaded.
    #[error("No document uploaded. Please upload a document first.")]
    NoDocument,

    /// The uploaded file exceeds the configured size cap.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Decoding the uploaded bytes into text failed.
    #[error("error processing document: {0}")]
    Extraction(#[from] ExtractError),

    /// The model backend round trip failed.
    #[error("error querying the model backend: {0}")]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ApiError::Validation(_) | ApiError::UnsupportedFormat | ApiError::NoDocument => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),

            // Internal errors: log the full detail, return a short message.
            ApiError::Extraction(e) => {
                error!(error = %e, "document extraction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing document.".to_owned(),
                )
            }
            ApiError::Gateway(e) => {
                error!(error = %e, "model backend call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error communicating with the model backend.".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        let response = ApiError::NoDocument.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Validation("Message is required.".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::UnsupportedFormat.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let response = ApiError::Gateway(GatewayError::EmptyCompletion).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
