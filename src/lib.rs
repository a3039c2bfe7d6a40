//! Focusboard: a personal task board with planning insight and an assistant.
//!
//! The crate holds the task store, the analytics derived from it, and the
//! language-model assistant that helps pick what to work on next.
//!
//! # Architecture
//!
//! Focusboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (files, HTTP APIs)
//!
//! # Modules
//!
//! - [`task`]: Tasks, projects, hierarchy, and the priority list
//! - [`insight`]: Alerts, smart suggestions, and metrics over a task set
//! - [`assistant`]: Chat and recommendations backed by a language model
//! - [`proxy`]: HTTP surface exposing the assistant
//! - [`config`]: Environment-driven settings

pub mod assistant;
pub mod config;
pub mod insight;
pub mod proxy;
pub mod task;

#[cfg(test)]
mod test_support;
