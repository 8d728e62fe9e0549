//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use barter_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// A missing, malformed or expired token rejects with
/// [`AppError::LoginRequired`], which redirects to the login route with the
/// requested path as `next`.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            tracing::debug!("Request without bearer token");
            return Err(login_required(parts));
        };

        match validate_token(token, &state.config.jwt) {
            Ok(claims) => Ok(AuthUser {
                user_id: claims.sub,
                username: claims.username,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                Err(login_required(parts))
            }
        }
    }
}

/// Redirect back to the full requested URI (nested routers strip the prefix
/// from `parts.uri`, so prefer [`OriginalUri`]).
fn login_required(parts: &Parts) -> AppError {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    AppError::LoginRequired { next }
}
