//! Storage seam for Tops and their items.
//!
//! Implementations own atomicity: every write covers the Top row and its item
//! rows together, and like increments are read-modify-write under the
//! backend's own locking.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::top::Top;

pub use memory::MemoryTopRepository;
pub use postgres::PgTopRepository;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Top id already exists: {0}")]
    DuplicateId(String),

    /// The counter is already at `i32::MAX`.
    #[error("Like counter is at its maximum")]
    LikesLimit,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait TopRepository: Send + Sync {
    /// All Tops whose title contains `title_filter`, or all Tops when the
    /// filter is absent or empty.
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Top>, StorageError>;

    async fn find(&self, id: &str) -> Result<Option<Top>, StorageError>;

    /// Store a new Top and its items.
    async fn insert(&self, top: &Top) -> Result<(), StorageError>;

    /// Persist the title and item names of an existing Top.
    ///
    /// Like counters are left as stored. Returns `false` if the Top is gone.
    async fn update_content(&self, top: &Top) -> Result<bool, StorageError>;

    /// Remove the items of a Top, then the Top itself.
    ///
    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;

    /// Add one like to a Top, returning the new count.
    ///
    /// Fails with `StorageError::LikesLimit`, leaving the count unchanged, if
    /// it cannot grow.
    async fn increment_top_likes(&self, id: &str) -> Result<Option<i32>, StorageError>;

    /// Add one like to the item at `position`, returning the new count.
    async fn increment_item_likes(
        &self,
        id: &str,
        position: i32,
    ) -> Result<Option<i32>, StorageError>;
}
