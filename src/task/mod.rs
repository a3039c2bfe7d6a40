//! Task and project management.
//!
//! This module owns the task/project data model, the parent/child
//! eligibility rules and the "Today's Priorities" list, and exposes them
//! through a store that persists the whole collection after every change.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
