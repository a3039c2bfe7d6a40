//! Client-side chat session with a single in-flight request.

use super::AssistantService;
use crate::assistant::domain::{AssistantError, AssistantReply, ChatRequest, Conversation};
use crate::assistant::ports::LanguageModel;
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Conversation with the assistant.
///
/// Only one request may be in flight; another one started meanwhile fails
/// at once with [`AssistantError::RequestInFlight`] and is not logged.
/// Failures are appended to the log as error entries. The session never
/// touches a task collection.
pub struct ChatSession<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    service: Arc<AssistantService<M, C>>,
    loading: AtomicBool,
    conversation: Mutex<Conversation>,
}

/// Clears the loading flag when the request settles, however it settles.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<M, C> ChatSession<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Starts an empty session.
    #[must_use]
    pub fn new(service: Arc<AssistantService<M, C>>) -> Self {
        Self {
            service,
            loading: AtomicBool::new(false),
            conversation: Mutex::new(Conversation::new()),
        }
    }

    /// Returns whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Returns a copy of the conversation so far.
    pub async fn conversation(&self) -> Conversation {
        self.conversation.lock().await.clone()
    }

    /// Sends `request` and records the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::EmptyMessage`] for a blank message,
    /// [`AssistantError::RequestInFlight`] while another request is pending,
    /// or the failure of this request after logging it.
    pub async fn send(&self, request: &ChatRequest) -> Result<AssistantReply, AssistantError> {
        if request.message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("rejected chat request while another is in flight");
            return Err(AssistantError::RequestInFlight);
        }
        let _guard = LoadingGuard(&self.loading);

        self.conversation
            .lock()
            .await
            .push_user(request.message.trim());
        let outcome = self.service.ask(request).await;
        let mut conversation = self.conversation.lock().await;
        match &outcome {
            Ok(reply) => conversation.push_reply(reply),
            Err(err) => conversation.push_error(err),
        }
        outcome
    }
}
