use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{LinkRepository, StorageError};
use crate::models::{Link, NewLink};

const LINK_COLUMNS: &str =
    "id, name, url, description, image_url, slug, status, created_at, updated_at";

/// SQLite-backed repository. One row per link in the `links` table; the
/// rowid is the record id. The UNIQUE index on `slug` is the atomic backstop
/// for the service-level dedup check.
#[derive(Clone)]
pub struct SqliteLinkRepository {
    pool: SqlitePool,
}

impl SqliteLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, StorageError> {
        let link: Option<Link> =
            sqlx::query_as(&format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(link)
    }

    async fn find_all(&self) -> Result<Vec<Link>, StorageError> {
        let links: Vec<Link> = sqlx::query_as(&format!("SELECT {LINK_COLUMNS} FROM links"))
            .fetch_all(&self.pool)
            .await?;

        Ok(links)
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool, StorageError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE slug = ?1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, link: NewLink) -> Result<Link, StorageError> {
        let inserted = sqlx::query(
            "INSERT INTO links (name, url, description, image_url, slug, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&link.name)
        .bind(&link.url)
        .bind(&link.description)
        .bind(&link.image_url)
        .bind(&link.slug)
        .bind(link.status)
        .bind(link.created_at)
        .execute(&self.pool)
        .await;

        let id = match inserted {
            Ok(done) => done.last_insert_rowid(),
            Err(e) if is_unique_violation(&e) => {
                return Err(StorageError::DuplicateSlug(link.slug));
            }
            Err(e) => return Err(e.into()),
        };

        let stored: Link =
            sqlx::query_as(&format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(stored)
    }

    async fn replace(&self, link: &Link) -> Result<bool, StorageError> {
        let affected = sqlx::query(
            "UPDATE links
             SET name = ?1, url = ?2, description = ?3, image_url = ?4,
                 slug = ?5, status = ?6, created_at = ?7, updated_at = ?8
             WHERE id = ?9",
        )
        .bind(&link.name)
        .bind(&link.url)
        .bind(&link.description)
        .bind(&link.image_url)
        .bind(&link.slug)
        .bind(link.status)
        .bind(link.created_at)
        .bind(link.updated_at)
        .bind(link.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let affected = sqlx::query("DELETE FROM links WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
