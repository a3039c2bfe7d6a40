//! Stateless assistant: prompt, call the model, parse the answer.

use super::prompt::{chat_prompt, recommendation_prompt};
use crate::assistant::domain::{
    AssistantError, AssistantReply, ChatRequest, RecommendationList, RecommendationRequest,
};
use crate::assistant::ports::LanguageModel;
use crate::insight::Moment;
use chrono::FixedOffset;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Assistant service over a language model.
///
/// Holds no task state; each call works only on the tasks it is given.
pub struct AssistantService<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    model: Arc<M>,
    clock: Arc<C>,
    offset: FixedOffset,
}

impl<M, C> AssistantService<M, C>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    /// Creates a service whose calendar days follow `offset`.
    #[must_use]
    pub const fn new(model: Arc<M>, clock: Arc<C>, offset: FixedOffset) -> Self {
        Self {
            model,
            clock,
            offset,
        }
    }

    /// Returns the current evaluation moment.
    #[must_use]
    pub fn moment(&self) -> Moment {
        Moment::from_clock(self.clock.as_ref(), self.offset)
    }

    /// Answers a chat message about the tasks in `request`.
    ///
    /// Suggested identifiers are limited to incomplete tasks of the request.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::EmptyMessage`] for a blank message, or the
    /// mapped model failure.
    pub async fn ask(&self, request: &ChatRequest) -> Result<AssistantReply, AssistantError> {
        if request.message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        let prompt = chat_prompt(request, &self.moment())?;
        let raw = self.model.complete(&prompt).await.map_err(|err| {
            warn!(error = %err, "chat request failed");
            AssistantError::from(err)
        })?;
        let reply = AssistantReply::parse(&raw, &request.todos);
        debug!(
            suggestions = reply.suggestions.len(),
            "chat answer parsed"
        );
        Ok(reply)
    }

    /// Recommends up to three tasks from `request`.
    ///
    /// # Errors
    ///
    /// Returns the mapped model failure, or [`AssistantError::Unparsable`]
    /// when the answer holds no recommendation list.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationList, AssistantError> {
        let prompt = recommendation_prompt(&request.todos, &self.moment())?;
        let raw = self.model.complete(&prompt).await.map_err(|err| {
            warn!(error = %err, "recommendation request failed");
            AssistantError::from(err)
        })?;
        let list = RecommendationList::parse(&raw).inspect_err(|err| {
            warn!(error = %err, "recommendation answer rejected");
        })?;
        debug!(
            recommendations = list.recommendations.len(),
            "recommendations parsed"
        );
        Ok(list)
    }
}
