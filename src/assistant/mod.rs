//! Advisory assistant backed by a language model.
//!
//! The assistant receives a task list, asks the model which tasks to focus
//! on and returns free text plus task identifiers filtered against that
//! list. It never mutates a task collection; accepting its suggestions is
//! an explicit store operation.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
