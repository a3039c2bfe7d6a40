//! In-memory repository for task store tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::TaskCollection,
    ports::{CollectionRepository, CollectionRepositoryError, CollectionRepositoryResult},
};

/// Thread-safe in-memory collection repository.
///
/// Records how many saves happened and can be told to fail loads or saves,
/// so store behaviour around persistence can be observed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollectionRepository {
    state: Arc<RwLock<InMemoryCollectionState>>,
}

#[derive(Debug, Default)]
struct InMemoryCollectionState {
    saved: Option<TaskCollection>,
    save_count: usize,
    malformed: bool,
    reject_saves: bool,
}

impl InMemoryCollectionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `collection`.
    #[must_use]
    pub fn with_collection(collection: TaskCollection) -> Self {
        let repository = Self::new();
        if let Ok(mut state) = repository.state.write() {
            state.saved = Some(collection);
        }
        repository
    }

    /// Creates a repository whose saved state cannot be decoded.
    #[must_use]
    pub fn malformed() -> Self {
        let repository = Self::new();
        if let Ok(mut state) = repository.state.write() {
            state.malformed = true;
        }
        repository
    }

    /// Makes every subsequent save fail.
    pub fn reject_saves(&self) {
        if let Ok(mut state) = self.state.write() {
            state.reject_saves = true;
        }
    }

    /// Returns the number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.save_count)
    }

    /// Returns the most recently saved collection.
    #[must_use]
    pub fn saved(&self) -> Option<TaskCollection> {
        self.state.read().ok().and_then(|state| state.saved.clone())
    }
}

fn lock_error(err: impl std::fmt::Display) -> CollectionRepositoryError {
    CollectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CollectionRepository for InMemoryCollectionRepository {
    async fn load(&self) -> CollectionRepositoryResult<Option<TaskCollection>> {
        let state = self.state.read().map_err(lock_error)?;
        if state.malformed {
            return Err(CollectionRepositoryError::Malformed {
                source_name: "memory".to_owned(),
                reason: "saved state marked malformed".to_owned(),
            });
        }
        Ok(state.saved.clone())
    }

    async fn save(&self, collection: &TaskCollection) -> CollectionRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.reject_saves {
            return Err(lock_error("saves are rejected"));
        }
        state.saved = Some(collection.clone());
        state.save_count += 1;
        Ok(())
    }
}
