//! Language-model port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for language-model calls.
pub type ModelResult<T> = Result<T, ModelError>;

/// A rendered prompt: system instructions plus one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// System instructions.
    pub system: String,
    /// User turn, carrying the task data and the question.
    pub user: String,
}

/// Text completion contract.
///
/// A call either returns the full answer or fails; there is no streaming.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` and returns the model's text answer.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when credentials are missing, the upstream
    /// fails or rate limits, or the answer cannot be read.
    async fn complete(&self, prompt: &Prompt) -> ModelResult<String>;
}

/// Errors returned by language-model adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// No API key is configured.
    #[error("no API key configured")]
    MissingCredentials,

    /// Non-success status other than rate limiting.
    #[error("upstream returned status {status}: {body}")]
    Upstream {
        /// HTTP status.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Status 429.
    #[error("upstream rate limited the request")]
    RateLimited {
        /// Value of the `retry-after` header in seconds, when present.
        retry_after: Option<u64>,
    },

    /// The response body did not have the expected shape.
    #[error("unparsable upstream response: {0}")]
    Unparsable(String),

    /// Connection, TLS or timeout failure.
    #[error("transport failure: {0}")]
    Transport(String),
}
