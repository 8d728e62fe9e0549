//! Shared response envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use barter_core::ownership::NotAuthor;
use serde::Serialize;

/// Standard `{ "data": ... }` envelope for API responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A plain message page, rendered with `200 OK`.
///
/// Used when a request is refused without being an error, e.g. a non-owner
/// opening another user's ad for editing.
#[derive(Debug, Serialize)]
pub struct MessagePage {
    pub message: &'static str,
}

impl From<NotAuthor> for MessagePage {
    fn from(denied: NotAuthor) -> Self {
        Self {
            message: denied.message(),
        }
    }
}

impl IntoResponse for MessagePage {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
