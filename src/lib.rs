use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod service;
pub mod slug;
pub mod structured;

use service::LinkService;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub links: LinkService,
    pub config: config::AppConfig,
}

// ── Router ─────────────────────────────────────────────────────────────────

/// Build the full application router on top of the given state.
///
/// Every response (success or error) leaves with the shared-cache header;
/// axum always sets `Content-Type: application/json` for the `Json` bodies
/// the handlers return.
pub fn router(state: Arc<AppState>) -> Router {
    let cache_control = HeaderValue::try_from(format!(
        "public, max-age={}, must-revalidate",
        state.config.cache_max_age_secs
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=7200, must-revalidate"));

    Router::new()
        // Health check — no auth, used by deploy probes
        .route("/health", get(|| async { StatusCode::OK }))
        .route(
            "/links",
            get(handlers::links::list_links).post(handlers::links::create_link),
        )
        // Trailing-slash listing variant kept for existing consumers;
        // axum does not redirect between the two forms.
        .route("/links/", get(handlers::links::list_links))
        .route("/links/check", post(handlers::links::check_link))
        .route("/links/check/:url", post(handlers::links::check_link_path))
        .route(
            "/links/:link_id",
            get(handlers::links::get_link)
                .put(handlers::links::update_link)
                .delete(handlers::links::delete_link),
        )
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            cache_control,
        ))
        .layer(TraceLayer::new_for_http())
}
