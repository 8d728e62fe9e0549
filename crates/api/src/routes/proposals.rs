//! Route definitions for the `/proposals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::proposals;
use crate::state::AppState;

/// Routes mounted at `/proposals`. All require auth.
///
/// ```text
/// GET  /create/{sender_ad_id}/{receiver_ad_id} -> create_form
/// POST /create/{sender_ad_id}/{receiver_ad_id} -> create
/// GET  /update/{proposal_id}                   -> update_form
/// POST /update/{proposal_id}                   -> update
/// GET  /list                                   -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/create/{sender_ad_id}/{receiver_ad_id}",
            get(proposals::create_form).post(proposals::create),
        )
        .route(
            "/update/{proposal_id}",
            get(proposals::update_form).post(proposals::update),
        )
        .route("/list", get(proposals::list))
}
