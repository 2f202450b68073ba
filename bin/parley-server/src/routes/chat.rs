//! Chat endpoints: converse with the model backend and inspect or reset
//! the in-memory conversation history.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::schemas::chat::{ChatEntry, ChatRequest, MessageResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat, history, clear_history),
    components(schemas(ChatRequest, ChatEntry, MessageResponse))
)]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
        .route("/clear_history", post(clear_history))
}

/// Converse with the model backend (`POST /chat`).
///
/// The message is sent verbatim as the prompt. On success the exchange is
/// appended to the history and returned; on failure the history is left
/// untouched.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatEntry),
        (status = 400, description = "Empty message"),
        (status = 500, description = "Model backend failure"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatEntry>, ApiError> {
    if req.message.is_empty() {
        return Err(ApiError::Validation("Message is required.".into()));
    }

    debug!(message_chars = req.message.chars().count(), "chat request");

    let bot = state.gateway.complete(&req.message).await?;

    let entry = ChatEntry {
        user: req.message,
        bot,
    };
    state.history.append(entry.clone());

    Ok(Json(entry))
}

/// Retrieve the conversation so far (`GET /history`), oldest first.
#[utoipa::path(
    get,
    path = "/history",
    tag = "chat",
    responses(
        (status = 200, description = "Recorded exchanges", body = Vec<ChatEntry>)
    )
)]
pub async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatEntry>> {
    Json(state.history.list())
}

/// Forget the conversation so far (`POST /clear_history`). Idempotent.
#[utoipa::path(
    post,
    path = "/clear_history",
    tag = "chat",
    responses(
        (status = 200, description = "History cleared", body = MessageResponse)
    )
)]
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.history.clear();
    Json(MessageResponse {
        message: "Chat history cleared.".to_owned(),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::gateway::testing::ScriptedGateway;

    fn state_with(gateway: ScriptedGateway) -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(Config::test_default()),
            Arc::new(gateway),
        ))
    }

    #[tokio::test]
    async fn chat_appends_exactly_one_entry() {
        let state = state_with(ScriptedGateway::replying("hi there"));

        let Json(entry) = chat(
            State(state.clone()),
            Json(ChatRequest {
                message: "hello".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(entry.user, "hello");
        assert_eq!(entry.bot, "hi there");
        assert_eq!(state.history.list().len(), 1);
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_touching_history() {
        let state = state_with(ScriptedGateway::replying("unused"));

        let result = chat(
            State(state.clone()),
            Json(ChatRequest {
                message: String::new(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(state.history.list().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_leaves_history_untouched() {
        let state = state_with(ScriptedGateway::failing("backend down"));

        let result = chat(
            State(state.clone()),
            Json(ChatRequest {
                message: "hello".into(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Gateway(_))));
        assert!(state.history.list().is_empty());
    }

    #[tokio::test]
    async fn history_preserves_insertion_order() {
        let state = state_with(ScriptedGateway::replying("ack"));

        for message in ["one", "two", "three"] {
            chat(
                State(state.clone()),
                Json(ChatRequest {
                    message: message.into(),
                }),
            )
            .await
            .unwrap();
        }

        let Json(entries) = history(State(state.clone())).await;
        let users: Vec<&str> = entries.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn clear_history_empties_any_prior_state() {
        let state = state_with(ScriptedGateway::replying("ack"));

        for _ in 0..3 {
            chat(
                State(state.clone()),
                Json(ChatRequest {
                    message: "ping".into(),
                }),
            )
            .await
            .unwrap();
        }

        let Json(confirmation) = clear_history(State(state.clone())).await;
        assert_eq!(confirmation.message, "Chat history cleared.");
        assert!(state.history.list().is_empty());

        // Clearing an already-empty history is a no-op.
        clear_history(State(state.clone())).await;
        assert!(state.history.list().is_empty());
    }
}
