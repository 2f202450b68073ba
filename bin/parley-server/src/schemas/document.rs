//! Document endpoint request / response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form for `POST /upload_document` (documentation only; the
/// handler reads the raw multipart stream).
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// The document to upload (`.txt`, `.pdf`, or `.docx`).
    #[schema(value_type = String, format = Binary)]
    #[allow(dead_code)]
    pub file: String,
}

/// Response body for `POST /upload_document`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// First 500 characters of the extracted text.
    pub content_preview: String,
}

/// Request body for `POST /query_document`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// Question to answer against the uploaded document.
    pub query: String,
}

/// Response body for `POST /query_document`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    /// The backend's answer.
    pub response: String,
}
