//! Language-model adapters.

mod anthropic;
mod scripted;

pub use anthropic::{ANTHROPIC_VERSION, AnthropicClient};
pub use scripted::ScriptedModel;
