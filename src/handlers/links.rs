use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::RequireAuth,
    error::LinkError,
    models::{Link, LinkDraft, LinkStatus, LinkUpdate, LinkView},
    AppState,
};

// ── Query/body types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckPayload {
    url: String,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /links/:link_id
pub async fn get_link(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<i64>,
) -> Result<Json<LinkView>, LinkError> {
    Ok(Json(state.links.get_by_id(link_id).await?))
}

/// GET /links and /links/
///
/// Validates the optional `status` query parameter before anything touches
/// the store; anything besides the two defined states is a 400.
pub async fn list_links(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LinkView>>, LinkError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            LinkStatus::parse(raw).ok_or_else(|| LinkError::InvalidStatus(raw.to_owned()))?,
        ),
        None => None,
    };

    Ok(Json(state.links.list_all(status).await?))
}

/// POST /links/check
pub async fn check_link(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckPayload>,
) -> Result<Response, LinkError> {
    check_url(&state, payload.url).await
}

/// POST /links/check/:url — same check with the URL in the path.
pub async fn check_link_path(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(url): Path<String>,
) -> Result<Response, LinkError> {
    check_url(&state, url).await
}

/// Pre-flight dedup check used by API consumers before a create. Taken URLs
/// answer 409 with the same message a failed create would carry.
async fn check_url(state: &AppState, url: String) -> Result<Response, LinkError> {
    if state.links.check_url_taken(&url).await? {
        let body = json!({ "msg": LinkError::UrlTaken(url).to_string() });
        Ok((StatusCode::CONFLICT, Json(body)).into_response())
    } else {
        let body = json!({ "msg": format!("URL: '{url}' is available.") });
        Ok((StatusCode::OK, Json(body)).into_response())
    }
}

/// POST /links
pub async fn create_link(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(draft): Json<LinkDraft>,
) -> Result<(StatusCode, Json<Link>), LinkError> {
    let stored = state.links.create(draft).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /links/:link_id
pub async fn update_link(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<i64>,
    Json(payload): Json<LinkUpdate>,
) -> Result<Json<Link>, LinkError> {
    Ok(Json(state.links.update(link_id, payload).await?))
}

/// DELETE /links/:link_id
pub async fn delete_link(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<i64>,
) -> Result<Json<serde_json::Value>, LinkError> {
    state.links.remove(link_id).await?;
    Ok(Json(json!({
        "message": format!("Link with id: '{link_id}' removed.")
    })))
}
