//! Domain model for tasks, projects and the priority list.
//!
//! The domain holds the entity definitions, their invariants and the
//! parent/child eligibility rules, with persistence and presentation kept
//! outside the boundary.

mod collection;
mod error;
pub mod hierarchy;
mod ids;
mod kind;
mod priority_list;
mod project;
mod record;
mod task;
mod time;

pub use collection::TaskCollection;
pub use error::TaskDomainError;
pub use hierarchy::{accepts_child, can_be_parent};
pub use ids::{ProjectId, ProjectName, TaskId, TaskText};
pub use kind::{Priority, TaskType, Workspace};
pub use priority_list::ordered_ids as priority_order;
pub use project::Project;
pub use record::{RawDate, TaskRecord};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskDraft};
pub use time::Timestamp;
