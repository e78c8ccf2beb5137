//! Handler-level error taxonomy.
//!
//! Every failure a handler can produce converts to a JSON body right here,
//! so nothing ever propagates to the client as an unhandled fault. Two
//! compatibility quirks are kept on purpose: a missing record answers 400
//! (not 404), and the not-found body uses the key `msg` where the other
//! errors use `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::repo::StorageError;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("No link found with id: '{0}'.")]
    NotFound(i64),

    #[error("A link with URL: '{0}' already exists.")]
    UrlTaken(String),

    #[error("Unsupported status filter: '{0}'.")]
    InvalidStatus(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            LinkError::Unauthorized => {
                (StatusCode::FORBIDDEN, json!({ "message": self.to_string() }))
            }
            LinkError::NotFound(_) => {
                (StatusCode::BAD_REQUEST, json!({ "msg": self.to_string() }))
            }
            LinkError::UrlTaken(_) | LinkError::InvalidStatus(_) => {
                (StatusCode::BAD_REQUEST, json!({ "message": self.to_string() }))
            }
            LinkError::Storage(e) => {
                tracing::error!("storage failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
