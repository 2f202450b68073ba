//! Model gateway: the narrow seam between HTTP handlers and the external
//! language-model backend.
//!
//! Handlers depend only on the [`ModelGateway`] trait so tests can
//! substitute a scripted double; [`openai::OpenAiGateway`] is the
//! production implementation.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a [`ModelGateway::complete`] round trip.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (connect, TLS, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered 2xx but no completion text was present.
    #[error("no completion in backend response")]
    EmptyCompletion,
}

/// A stateless facade over the external language-model API.
///
/// One prompt in, one completion out; no retry, no caching, no state
/// beyond the configured credential.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send `prompt` to the backend and return its text reply.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{GatewayError, ModelGateway};

    /// Scripted gateway for handler tests: replies with a fixed string (or
    /// a fixed failure) and records every prompt it receives.
    pub struct ScriptedGateway {
        reply: Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_owned()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(body: &str) -> Self {
            Self {
                reply: Err(body.to_owned()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(body) => Err(GatewayError::Backend {
                    status: 500,
                    body: body.clone(),
                }),
            }
        }
    }
}
