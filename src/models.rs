use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::structured::{self, StructuredData};

// ── Status ─────────────────────────────────────────────────────────────────

/// Moderation state of a link. New links always start out `Pending`; the
/// promotion to `Approved` happens outside this service and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LinkStatus {
    Pending,
    Approved,
}

impl LinkStatus {
    /// Parse a query-parameter value. Anything outside the two defined states
    /// is rejected before it ever reaches storage.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }
}

// ── Records ────────────────────────────────────────────────────────────────

/// A stored link record from the `links` table.
///
/// `slug` is internal dedup state: it appears in create/update responses but
/// is stripped from detail and listing responses (see [`LinkView`]).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub slug: String,
    pub status: LinkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A link ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub slug: String,
    pub status: LinkStatus,
    pub created_at: DateTime<Utc>,
}

// ── Request payloads ───────────────────────────────────────────────────────

/// Client-submitted fields for a new link. Everything else (`id`, `slug`,
/// `status`, timestamps) is stamped by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDraft {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Full-replace payload for `PUT /links/:link_id`. The `id` field is accepted
/// but ignored; the path parameter always wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub slug: String,
    pub status: LinkStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Response shape ─────────────────────────────────────────────────────────

/// Presentation form of a [`Link`]: `slug` stripped, structured-data
/// projection attached. Used by the detail and listing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: LinkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub structured_data: StructuredData,
}

impl From<Link> for LinkView {
    fn from(link: Link) -> Self {
        let structured_data = structured::project(&link);
        Self {
            id: link.id,
            name: link.name,
            url: link.url,
            description: link.description,
            image_url: link.image_url,
            status: link.status,
            created_at: link.created_at,
            updated_at: link.updated_at,
            structured_data,
        }
    }
}
