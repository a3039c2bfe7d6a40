//! Repository port for whole-collection persistence.

use crate::task::domain::TaskCollection;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for collection repository operations.
pub type CollectionRepositoryResult<T> = Result<T, CollectionRepositoryError>;

/// Whole-collection persistence contract.
///
/// Implementations store the full task and project lists on every save;
/// there are no partial writes.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Loads the saved collection.
    ///
    /// Returns `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionRepositoryError::Malformed`] when saved state
    /// exists but cannot be decoded, or
    /// [`CollectionRepositoryError::Persistence`] when it cannot be read.
    async fn load(&self) -> CollectionRepositoryResult<Option<TaskCollection>>;

    /// Replaces the saved collection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionRepositoryError::Persistence`] when the write
    /// fails.
    async fn save(&self, collection: &TaskCollection) -> CollectionRepositoryResult<()>;
}

/// Errors returned by collection repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CollectionRepositoryError {
    /// Saved state exists but could not be decoded.
    #[error("malformed saved state in {source_name}: {reason}")]
    Malformed {
        /// Name of the unreadable blob.
        source_name: String,
        /// Decoder message.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CollectionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
