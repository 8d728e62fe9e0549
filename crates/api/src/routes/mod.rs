pub mod ads;
pub mod auth;
pub mod health;
pub mod proposals;

use axum::Router;

use crate::state::AppState;

/// Where successful ad mutations redirect.
pub const AD_LIST_PATH: &str = "/api/v1/ads/list";
/// Where successful proposal mutations redirect.
pub const PROPOSAL_LIST_PATH: &str = "/api/v1/proposals/list";
/// Where unauthenticated requests and new registrations are sent.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth                                   register, login, current user
/// /ads                                    create, edit, delete, list
/// /proposals                              create, update status, list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ads", ads::router())
        .nest("/proposals", proposals::router())
}
