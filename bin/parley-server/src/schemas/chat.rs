//! Chat endpoint request / response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's message; must be non-empty.
    pub message: String,
}

/// One completed user/bot exchange.
///
/// Returned by `POST /chat` and, in insertion order, by `GET /history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatEntry {
    /// The message the user sent.
    pub user: String,
    /// The backend's reply.
    pub bot: String,
}

/// Body for message-only responses such as `POST /clear_history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}
