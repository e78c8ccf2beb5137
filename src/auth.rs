use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::error::LinkError;
use crate::AppState;

// ── Bearer-token extractor ─────────────────────────────────────────────────

/// Extractor that enforces bearer-token authentication on any handler that
/// includes it as a parameter. The request must carry
/// `Authorization: Bearer <token>` matching the configured API token;
/// otherwise the extractor short-circuits with 403 and the handler never
/// runs. When auth is disabled by configuration every request passes.
pub struct RequireAuth;

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = LinkError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);

        if !state.config.auth_enabled {
            return Ok(RequireAuth);
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if !state.config.api_token.is_empty() && token == state.config.api_token => {
                Ok(RequireAuth)
            }
            _ => Err(LinkError::Unauthorized),
        }
    }
}
