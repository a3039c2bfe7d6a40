//! Failures surfaced by the assistant.

use crate::assistant::ports::ModelError;
use thiserror::Error;

/// Assistant failure, each with its own user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistantError {
    /// The message to send was blank.
    #[error("message is empty")]
    EmptyMessage,

    /// The request body could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A request from the same session is still in flight.
    #[error("a request is already in flight")]
    RequestInFlight,

    /// No API key is configured.
    #[error("language model credentials are not configured")]
    MissingCredentials,

    /// The upstream answered with a non-success status.
    #[error("language model returned status {status}")]
    Upstream {
        /// HTTP status from the upstream.
        status: u16,
    },

    /// The upstream rejected the request for rate limiting.
    #[error("language model rate limited the request")]
    RateLimited {
        /// Seconds to wait before retrying, when the upstream said.
        retry_after: Option<u64>,
    },

    /// The upstream answer could not be understood.
    #[error("language model response could not be parsed: {0}")]
    Unparsable(String),

    /// The upstream could not be reached.
    #[error("language model request failed: {0}")]
    Transport(String),

    /// The prompt could not be rendered.
    #[error("failed to render prompt: {0}")]
    Prompt(String),
}

impl AssistantError {
    /// Returns the message shown to the user in place of a reply.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyMessage => "Type a question before sending.".to_owned(),
            Self::InvalidRequest(reason) => format!("The request could not be read: {reason}"),
            Self::RequestInFlight => {
                "Still working on your last question. Please wait for it to finish.".to_owned()
            }
            Self::MissingCredentials => {
                "The assistant is not configured yet: no API key was provided.".to_owned()
            }
            Self::Upstream { status } => {
                format!("The assistant service returned an error (status {status}). Please try again.")
            }
            Self::RateLimited {
                retry_after: Some(seconds),
            } => format!("Too many requests. Please try again in {seconds} seconds."),
            Self::RateLimited { retry_after: None } => {
                "Too many requests. Please try again shortly.".to_owned()
            }
            Self::Unparsable(_) => {
                "The assistant sent a response I could not read. Please try again.".to_owned()
            }
            Self::Transport(_) => {
                "Could not reach the assistant. Check your connection and try again.".to_owned()
            }
            Self::Prompt(_) => "Something went wrong preparing your request.".to_owned(),
        }
    }

    /// Returns the HTTP status the proxy answers with.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::EmptyMessage | Self::InvalidRequest(_) => 400,
            Self::RequestInFlight => 409,
            Self::RateLimited { .. } => 429,
            Self::Unparsable(_) | Self::Prompt(_) => 500,
            Self::Upstream { .. } => 502,
            Self::MissingCredentials => 503,
            Self::Transport(_) => 504,
        }
    }
}

impl From<ModelError> for AssistantError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MissingCredentials => Self::MissingCredentials,
            ModelError::Upstream { status, .. } => Self::Upstream { status },
            ModelError::RateLimited { retry_after } => Self::RateLimited { retry_after },
            ModelError::Unparsable(reason) => Self::Unparsable(reason),
            ModelError::Transport(reason) => Self::Transport(reason),
        }
    }
}
