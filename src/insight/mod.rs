//! Derived views over a task collection.
//!
//! Everything here is a pure function of a collection snapshot, a
//! [`ViewFilter`] and a [`Moment`]. Nothing is cached between evaluations.
//!
//! - [`classify`]: actionable, blocked and not-started predicates
//! - [`due`]: due-date classification and labels
//! - [`alerts`]: prioritised alert feed
//! - [`suggestions`]: advisory suggestions
//! - [`metrics`]: completion and workload metrics

pub mod alerts;
pub mod classify;
pub mod due;
pub mod metrics;
mod moment;
mod scope;
pub mod suggestions;

pub use alerts::{Alert, AlertDigest, AlertKind, generate_alerts};
pub use classify::{BlockedReason, Classifier};
pub use due::{DueLabel, DueStatus};
pub use metrics::{MetricsReport, Ratio, percentage};
pub use moment::Moment;
pub use scope::ViewFilter;
pub use suggestions::{Finding, Suggestion, SuggestionKind, smart_suggestions, suggestion_count};

#[cfg(test)]
mod tests;
