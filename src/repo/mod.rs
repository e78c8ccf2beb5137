//! Persistence-facing side of the catalog.
//!
//! The service layer only ever talks to the [`LinkRepository`] trait, so the
//! SQLite backend can be swapped for the in-memory one in tests (or for
//! local development without a database file).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Link, NewLink};

mod memory;
mod sqlite;

pub use memory::InMemoryLinkRepository;
pub use sqlite::SqliteLinkRepository;

/// A failure in the backing store. Everything the backend reports is folded
/// in here and surfaces to API consumers as a 500, except the duplicate-slug
/// case which the service turns into a conflict.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("a link with slug '{0}' already exists")]
    DuplicateSlug(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operations for link records.
///
/// `find_all` makes no ordering promise; callers sort. `delete` and
/// `replace` report whether anything was actually there, but deleting a
/// missing id is not an error.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, StorageError>;

    async fn find_all(&self) -> Result<Vec<Link>, StorageError>;

    /// Report whether any record's `slug` field equals the given value.
    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StorageError>;

    /// Store a new record and return it with its store-assigned id.
    async fn insert(&self, link: NewLink) -> Result<Link, StorageError>;

    /// Overwrite the entire record at `link.id`. No merge semantics.
    /// Returns `false` when no record existed at that id.
    async fn replace(&self, link: &Link) -> Result<bool, StorageError>;

    /// Remove the record at `id`. Returns `false` when nothing existed.
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;
}
