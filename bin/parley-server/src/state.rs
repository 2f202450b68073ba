//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ModelGateway;
use crate::store::{ChatHistory, DocumentStore};

/// State shared across all HTTP handlers, passed via `State<Arc<AppState>>`.
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Facade over the external language-model backend.
    pub gateway: Arc<dyn ModelGateway>,
    /// Ordered log of user/bot exchanges, process-wide.
    pub history: ChatHistory,
    /// Most recently uploaded document's extracted text.
    pub document: DocumentStore,
}

impl AppState {
    /// Assemble the state with empty history and no document.
    pub fn new(config: Arc<Config>, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            config,
            gateway,
            history: ChatHistory::new(),
            document: DocumentStore::new(),
        }
    }
}
