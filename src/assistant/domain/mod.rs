//! Assistant request, reply and conversation types.

mod brief;
mod conversation;
mod error;
mod reply;

pub use brief::{ChatRequest, MAX_BRIEFED_TASKS, RecommendationRequest, TaskBrief};
pub use conversation::{Conversation, ConversationEntry, Speaker};
pub use error::AssistantError;
pub use reply::{
    AssistantReply, MAX_RECOMMENDATIONS, Recommendation, RecommendationList, SUGGESTIONS_MARKER,
};
