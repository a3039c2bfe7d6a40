//! In-memory adapters for tests and ephemeral use.

mod collection;

pub use collection::InMemoryCollectionRepository;
