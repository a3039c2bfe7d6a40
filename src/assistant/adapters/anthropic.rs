//! Anthropic Messages API client.

use crate::assistant::ports::{LanguageModel, ModelError, ModelResult, Prompt};
use crate::config::AssistantConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upstream bodies are cut to this many characters in errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Language model backed by the Anthropic Messages API.
///
/// `ureq` is synchronous, so each call runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    config: AssistantConfig,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicClient {
    /// Creates a client with the configured timeout.
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    /// Returns the messages endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.api_base)
    }

    fn send(&self, api_key: &str, prompt: &Prompt) -> ModelResult<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": prompt.system,
            "messages": [{ "role": "user", "content": prompt.user }],
        });
        let response = self
            .agent
            .post(&self.endpoint())
            .set("x-api-key", api_key)
            .set("anthropic-version", ANTHROPIC_VERSION)
            .set("content-type", "application/json")
            .send_json(body)
            .map_err(map_ureq_error)?;
        let parsed: MessagesResponse = response
            .into_json()
            .map_err(|err| ModelError::Unparsable(err.to_string()))?;
        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(ModelError::Unparsable("answer has no text content".to_owned()));
        }
        Ok(text)
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, prompt: &Prompt) -> ModelResult<String> {
        let Some(api_key) = self.config.api_key.clone() else {
            warn!("language model call attempted without an API key");
            return Err(ModelError::MissingCredentials);
        };
        let client = self.clone();
        let owned_prompt = prompt.clone();
        debug!(model = %self.config.model, "sending prompt to language model");
        tokio::task::spawn_blocking(move || client.send(&api_key, &owned_prompt))
            .await
            .map_err(|err| ModelError::Transport(err.to_string()))?
            .inspect_err(|err| warn!(error = %err, "language model call failed"))
    }
}

fn map_ureq_error(err: ureq::Error) -> ModelError {
    match err {
        ureq::Error::Status(429, response) => ModelError::RateLimited {
            retry_after: response
                .header("retry-after")
                .and_then(|value| value.trim().parse().ok()),
        },
        ureq::Error::Status(status, response) => ModelError::Upstream {
            status,
            body: response
                .into_string()
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect(),
        },
        ureq::Error::Transport(transport) => ModelError::Transport(transport.to_string()),
    }
}
