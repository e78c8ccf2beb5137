use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{LinkRepository, StorageError};
use crate::models::{Link, NewLink};

/// In-memory repository backed by a DashMap, used by the test suite and for
/// running the service without a database file.
///
/// Iteration order is whatever the map yields, which matches the "storage
/// order not guaranteed" contract of `find_all`. Unlike SQLite there is no
/// atomic slug constraint here: `insert` does its own scan first, so the
/// check-then-act window of the service layer remains open.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<i64, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, StorageError> {
        Ok(self.links.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Link>, StorageError> {
        Ok(self.links.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StorageError> {
        Ok(self.links.iter().any(|entry| entry.value().slug == slug))
    }

    async fn insert(&self, link: NewLink) -> Result<Link, StorageError> {
        if self.exists_by_slug(&link.slug).await? {
            return Err(StorageError::DuplicateSlug(link.slug));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Link {
            id,
            name: link.name,
            url: link.url,
            description: link.description,
            image_url: link.image_url,
            slug: link.slug,
            status: link.status,
            created_at: link.created_at,
            updated_at: None,
        };
        self.links.insert(id, stored.clone());

        Ok(stored)
    }

    async fn replace(&self, link: &Link) -> Result<bool, StorageError> {
        match self.links.get_mut(&link.id) {
            Some(mut entry) => {
                *entry = link.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.links.remove(&id).is_some())
    }
}
