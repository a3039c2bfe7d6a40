//! Assistant orchestration.

mod assistant;
pub mod prompt;
mod session;

pub use assistant::AssistantService;
pub use session::ChatSession;
