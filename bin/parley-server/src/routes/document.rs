//! Document endpoints: upload a document and ask questions about it.
//!
//! Uploads arrive as multipart/form-data, are decoded to plain text
//! according to their extension, and replace the process-wide document
//! singleton. Queries prompt the model backend with the question plus a
//! truncated slice of the stored text.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::extract::{self, DocumentKind, PREVIEW_CHARS};
use crate::schemas::document::{QueryRequest, QueryResponse, UploadForm, UploadResponse};
use crate::state::AppState;

/// Upper bound on document characters included in a query prompt.
const PROMPT_CONTEXT_CHARS: usize = 4000;

#[derive(OpenApi)]
#[openapi(
    paths(upload_document, query_document),
    components(schemas(UploadForm, UploadResponse, QueryRequest, QueryResponse))
)]
pub struct DocumentApi;

/// Register document routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload_document", post(upload_document))
        .route("/query_document", post(query_document))
}

/// Upload a document (`POST /upload_document`).
///
/// Accepts a `.txt`, `.pdf`, or `.docx` file in the multipart `file`
/// field. The extracted text replaces any previously stored document
/// (last write wins) and the first 500 characters are returned as a
/// preview.
#[utoipa::path(
    post,
    path = "/upload_document",
    tag = "document",
    request_body(content = UploadForm, description = "Document upload (multipart/form-data)"),
    responses(
        (status = 200, description = "Document stored", body = UploadResponse),
        (status = 400, description = "Missing file or unsupported extension"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Text extraction failed"),
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let max_bytes = state.config.max_upload_mb * 1024 * 1024;

    let mut file_name = String::new();
    let mut file_bytes: Vec<u8> = Vec::new();
    let mut saw_file = false;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        file_name = field.file_name().unwrap_or("upload").to_owned();
        saw_file = true;

        // Stream the upload, enforcing the size cap as chunks arrive.
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read file chunk: {e}")))?
        {
            file_bytes.extend_from_slice(&chunk);
            if file_bytes.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge(format!(
                    "File too large: exceeds the {}MB limit.",
                    state.config.max_upload_mb
                )));
            }
        }
    }

    if !saw_file {
        return Err(ApiError::Validation("No file uploaded.".into()));
    }

    // Reject unsupported extensions before any decoding; the store is not
    // touched on this path.
    let kind = DocumentKind::from_filename(&file_name).ok_or(ApiError::UnsupportedFormat)?;

    debug!(
        file_name = %file_name,
        size_bytes = file_bytes.len(),
        kind = ?kind,
        "received document upload"
    );

    let text = kind.extract_text(file_bytes)?;
    let preview = extract::truncate_chars(&text, PREVIEW_CHARS).to_owned();
    state.document.replace(text);

    info!(file_name = %file_name, preview_chars = preview.chars().count(), "document stored");

    Ok(Json(UploadResponse {
        message: "Document uploaded successfully.".to_owned(),
        content_preview: preview,
    }))
}

/// Ask a question about the uploaded document (`POST /query_document`).
///
/// Fails when no (non-empty) document has been uploaded. The prompt sent
/// to the backend combines the question with at most the first 4000
/// characters of the stored text.
#[utoipa::path(
    post,
    path = "/query_document",
    tag = "document",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Answer generated", body = QueryResponse),
        (status = 400, description = "No document uploaded"),
        (status = 500, description = "Model backend failure"),
    )
)]
pub async fn query_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    // Snapshot the text so no lock is held during the backend round trip.
    let text = state.document.snapshot().ok_or(ApiError::NoDocument)?;

    let context = extract::truncate_chars(&text, PROMPT_CONTEXT_CHARS);
    let prompt = format!(
        "Use the following document to answer the question:\n\n{context}\n\nQuestion: {}",
        req.query
    );

    debug!(
        query_chars = req.query.chars().count(),
        context_chars = context.chars().count(),
        "document query"
    );

    let response = state.gateway.complete(&prompt).await?;

    Ok(Json(QueryResponse { response }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
