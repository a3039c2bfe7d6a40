//! Application services for the task store.

mod store;

pub use store::{
    PendingMutation, StoreOutcome, TaskStoreError, TaskStoreResult, TaskStoreService,
};
