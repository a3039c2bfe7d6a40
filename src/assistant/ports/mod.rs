//! Ports for the assistant.

mod language_model;

pub use language_model::{LanguageModel, ModelError, ModelResult, Prompt};
#[cfg(test)]
pub use language_model::MockLanguageModel;
