//! JSON blob persistence inside a capability-scoped directory.

mod repository;

pub use repository::{JsonFileCollectionRepository, PROJECTS_FILE, TODOS_FILE};
