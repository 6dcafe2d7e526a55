pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Movie, MovieInput};

/// Failures a storage backend can report. Handlers branch on these
/// rather than on a backend-specific error object.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie not found")]
    NotFound,
    #[error("invalid movie id `{0}`")]
    InvalidId(String),
    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),
}

/// Storage boundary for the movie collection. The database owns every
/// persisted record; the API layer keeps no copy.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies in storage-native (insertion) order.
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;

    async fn get(&self, id: &str) -> Result<Movie, StoreError>;

    /// Persists the input as-is and returns it with its assigned id.
    async fn insert(&self, input: MovieInput) -> Result<Movie, StoreError>;

    /// Partial merge: only fields present in `changes` are replaced.
    async fn update(&self, id: &str, changes: MovieInput) -> Result<Movie, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
