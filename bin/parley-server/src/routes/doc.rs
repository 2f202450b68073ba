//! OpenAPI document aggregation.

use utoipa::OpenApi;

use crate::routes::{chat, document, health};

#[derive(OpenApi)]
#[openapi(info(
    title = "parley-server",
    description = "Chat and document-Q&A API backed by an OpenAI-compatible model",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(document::DocumentApi::openapi());
    root
}
