//! Route definitions for the `/ads` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ads;
use crate::state::AppState;

/// Routes mounted at `/ads`. All require auth.
///
/// ```text
/// GET  /create           -> create_form
/// POST /create           -> create
/// GET  /edit/{ad_id}     -> edit_form (owner only)
/// POST /edit/{ad_id}     -> edit (owner only)
/// GET  /delete/{ad_id}   -> delete_form (owner only)
/// POST /delete/{ad_id}   -> delete (owner only)
/// GET  /list             -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", get(ads::create_form).post(ads::create))
        .route("/edit/{ad_id}", get(ads::edit_form).post(ads::edit))
        .route("/delete/{ad_id}", get(ads::delete_form).post(ads::delete))
        .route("/list", get(ads::list))
}
