//! Canned-answer language model for tests and offline use.

use crate::assistant::ports::{LanguageModel, ModelError, ModelResult, Prompt};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Language model that replays queued outcomes in order.
///
/// Every prompt received is kept for inspection. Once the queue is empty,
/// calls fail as unparsable.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    outcomes: Mutex<VecDeque<ModelResult<String>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    /// Creates a model with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model answering with `replies` in order.
    #[must_use]
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outcomes: Mutex::new(replies.into_iter().map(|reply| Ok(reply.into())).collect()),
            prompts: Mutex::default(),
        }
    }

    /// Queues a successful answer.
    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(reply.into()));
    }

    /// Queues a failure.
    pub async fn push_error(&self, err: ModelError) {
        self.outcomes.lock().await.push_back(Err(err));
    }

    /// Returns every prompt received so far.
    pub async fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &Prompt) -> ModelResult<String> {
        self.prompts.lock().await.push(prompt.clone());
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Unparsable("script exhausted".to_owned())))
    }
}
