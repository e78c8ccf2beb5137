//! Business rules on top of the repository: dedup by slug, server-stamped
//! fields, response shaping via the structured-data projection.

use std::sync::Arc;

use chrono::Utc;

use crate::error::LinkError;
use crate::models::{Link, LinkDraft, LinkStatus, LinkUpdate, LinkView, NewLink};
use crate::repo::{LinkRepository, StorageError};
use crate::slug;

#[derive(Clone)]
pub struct LinkService {
    repo: Arc<dyn LinkRepository>,
}

impl LinkService {
    pub fn new(repo: Arc<dyn LinkRepository>) -> Self {
        Self { repo }
    }

    /// Fetch a single link by id, shaped for presentation (slug stripped,
    /// structured data attached).
    pub async fn get_by_id(&self, id: i64) -> Result<LinkView, LinkError> {
        let link = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(LinkError::NotFound(id))?;

        Ok(LinkView::from(link))
    }

    /// List the whole catalog, optionally filtered by exact status, sorted
    /// ascending by name under ordinal comparison. An empty store is a valid
    /// empty listing, never an error.
    pub async fn list_all(&self, status: Option<LinkStatus>) -> Result<Vec<LinkView>, LinkError> {
        let mut links = self.repo.find_all().await?;

        if let Some(status) = status {
            links.retain(|link| link.status == status);
        }
        links.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(links.into_iter().map(LinkView::from).collect())
    }

    /// Pre-flight check: would a create for this URL collide? Creates
    /// nothing and reserves nothing.
    pub async fn check_url_taken(&self, url: &str) -> Result<bool, LinkError> {
        Ok(self.repo.exists_by_slug(&slug::normalize(url)).await?)
    }

    /// Create a link from a client draft. The server stamps `slug`,
    /// `created_at` and `status = pending`; a slug collision (either found by
    /// the pre-insert check or reported by the store's unique constraint)
    /// fails with the submitted URL in the error.
    pub async fn create(&self, draft: LinkDraft) -> Result<Link, LinkError> {
        let slug = slug::normalize(&draft.url);
        if self.repo.exists_by_slug(&slug).await? {
            return Err(LinkError::UrlTaken(draft.url));
        }

        let link = NewLink {
            name: draft.name,
            url: draft.url.clone(),
            description: draft.description,
            image_url: draft.image_url,
            slug,
            status: LinkStatus::Pending,
            created_at: Utc::now(),
        };

        match self.repo.insert(link).await {
            Ok(stored) => Ok(stored),
            Err(StorageError::DuplicateSlug(_)) => Err(LinkError::UrlTaken(draft.url)),
            Err(e) => Err(e.into()),
        }
    }

    /// Full replace of the record at `id`. The path id always wins over any
    /// id in the payload, and `updated_at` is overwritten with the current
    /// time. Targeting an id that does not exist is rejected rather than
    /// silently creating a record there.
    pub async fn update(&self, id: i64, payload: LinkUpdate) -> Result<Link, LinkError> {
        let link = Link {
            id,
            name: payload.name,
            url: payload.url,
            description: payload.description,
            image_url: payload.image_url,
            slug: payload.slug,
            status: payload.status,
            created_at: payload.created_at,
            updated_at: Some(Utc::now()),
        };

        if !self.repo.replace(&link).await? {
            return Err(LinkError::NotFound(id));
        }

        Ok(link)
    }

    /// Delete unconditionally. Removing an id that holds nothing still
    /// succeeds.
    pub async fn remove(&self, id: i64) -> Result<(), LinkError> {
        self.repo.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::InMemoryLinkRepository;

    fn test_service() -> LinkService {
        LinkService::new(Arc::new(InMemoryLinkRepository::new()))
    }

    fn draft(name: &str, url: &str) -> LinkDraft {
        LinkDraft {
            name: name.to_owned(),
            url: url.to_owned(),
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_stamps_slug_status_and_created_at() {
        let service = test_service();
        let stored = service.create(draft("A", "http://a.com")).await.unwrap();

        assert_eq!(stored.slug, "http-a-com");
        assert_eq!(stored.status, LinkStatus::Pending);
        assert!(stored.updated_at.is_none());
        assert!(stored.id > 0);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_url_after_normalization() {
        let service = test_service();
        service
            .create(draft("First", "Example.com/Page"))
            .await
            .unwrap();

        let err = service
            .create(draft("Second", "example.com/page"))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::UrlTaken(url) if url == "example.com/page"));
    }

    #[tokio::test]
    async fn duplicate_error_message_names_the_url() {
        let service = test_service();
        service.create(draft("A", "http://a.com")).await.unwrap();

        let err = service.create(draft("A", "http://a.com")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "A link with URL: 'http://a.com' already exists."
        );
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty_not_an_error() {
        let service = test_service();
        let links = service.list_all(None).await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn list_all_sorts_by_name_ascending() {
        let service = test_service();
        service.create(draft("mango", "http://m.com")).await.unwrap();
        service.create(draft("Apple", "http://a.com")).await.unwrap();
        service.create(draft("banana", "http://b.com")).await.unwrap();

        let names: Vec<String> = service
            .list_all(None)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();

        // ordinal comparison: uppercase sorts before lowercase
        assert_eq!(names, vec!["Apple", "banana", "mango"]);
        for pair in names.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[tokio::test]
    async fn status_filter_only_returns_matching_links() {
        let service = test_service();
        service.create(draft("a", "http://a.com")).await.unwrap();
        let b = service.create(draft("b", "http://b.com")).await.unwrap();

        // promote b out-of-band via the full-replace path
        let update = LinkUpdate {
            id: None,
            name: b.name.clone(),
            url: b.url.clone(),
            description: None,
            image_url: None,
            slug: b.slug.clone(),
            status: LinkStatus::Approved,
            created_at: b.created_at,
            updated_at: None,
        };
        service.update(b.id, update).await.unwrap();

        let approved = service.list_all(Some(LinkStatus::Approved)).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert!(approved.iter().all(|l| l.status == LinkStatus::Approved));

        let pending = service.list_all(Some(LinkStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "a");
    }

    #[tokio::test]
    async fn check_url_taken_reports_without_creating() {
        let service = test_service();
        assert!(!service.check_url_taken("http://a.com").await.unwrap());

        service.create(draft("A", "http://a.com")).await.unwrap();
        assert!(service.check_url_taken("HTTP://A.COM").await.unwrap());
        // the check itself must not have created anything
        assert_eq!(service.list_all(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_by_id_round_trips_the_draft_fields() {
        let service = test_service();
        let mut draft = draft("A", "http://a.com");
        draft.description = Some("desc".into());
        draft.image_url = Some("http://a.com/img.png".into());
        let stored = service.create(draft).await.unwrap();

        let view = service.get_by_id(stored.id).await.unwrap();
        assert_eq!(view.name, "A");
        assert_eq!(view.url, "http://a.com");
        assert_eq!(view.description.as_deref(), Some("desc"));
        assert_eq!(view.image_url.as_deref(), Some("http://a.com/img.png"));
        assert_eq!(view.status, LinkStatus::Pending);
        assert_eq!(view.structured_data.title, "A");
    }

    #[tokio::test]
    async fn get_by_id_after_delete_is_not_found() {
        let service = test_service();
        let stored = service.create(draft("A", "http://a.com")).await.unwrap();
        service.remove(stored.id).await.unwrap();

        let err = service.get_by_id(stored.id).await.unwrap_err();
        assert!(matches!(err, LinkError::NotFound(id) if id == stored.id));
    }

    #[tokio::test]
    async fn remove_of_missing_id_still_succeeds() {
        let service = test_service();
        service.remove(424242).await.unwrap();
    }

    #[tokio::test]
    async fn update_forces_path_id_and_stamps_updated_at() {
        let service = test_service();
        let stored = service.create(draft("A", "http://a.com")).await.unwrap();

        let update = LinkUpdate {
            id: Some(stored.id + 1000), // lies about its id
            name: "Renamed".into(),
            url: stored.url.clone(),
            description: None,
            image_url: None,
            slug: stored.slug.clone(),
            status: LinkStatus::Approved,
            created_at: stored.created_at,
            updated_at: None,
        };

        let updated = service.update(stored.id, update).await.unwrap();
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.name, "Renamed");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_rejected() {
        let service = test_service();
        let stored = service.create(draft("A", "http://a.com")).await.unwrap();

        let update = LinkUpdate {
            id: None,
            name: stored.name.clone(),
            url: stored.url.clone(),
            description: None,
            image_url: None,
            slug: stored.slug.clone(),
            status: stored.status,
            created_at: stored.created_at,
            updated_at: None,
        };

        let err = service.update(999, update).await.unwrap_err();
        assert!(matches!(err, LinkError::NotFound(999)));
        // and nothing was upserted at that id
        assert_eq!(service.list_all(None).await.unwrap().len(), 1);
    }
}
