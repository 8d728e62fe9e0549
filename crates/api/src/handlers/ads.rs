//! Handlers for the `/ads` resource.
//!
//! Each route is split into a GET half (form metadata or listing) and a POST
//! half (mutation followed by a redirect to the listing). Edit and delete are
//! owner-only on both halves.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use barter_core::ad::{validate_ad_form, AdForm, Category, Condition};
use barter_core::form::{Choice, Choices};
use barter_core::listing::AdFilter;
use barter_core::ownership::ensure_author;
use barter_core::types::DbId;
use barter_db::models::ad::{Ad, AdPage, CreateAd};
use barter_db::repositories::AdRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::AdListParams;
use crate::response::{DataResponse, MessagePage};
use crate::routes::AD_LIST_PATH;
use crate::state::AppState;

/// Payload for the create and edit forms.
#[derive(Debug, Serialize)]
pub struct AdFormPage {
    /// The ad being edited; absent on create.
    pub ad: Option<Ad>,
    pub category_choices: Vec<Choice>,
    pub condition_choices: Vec<Choice>,
}

impl AdFormPage {
    fn new(ad: Option<Ad>) -> Self {
        Self {
            ad,
            category_choices: Category::choices(),
            condition_choices: Condition::choices(),
        }
    }
}

/// One page of the ad listing plus the filter values that produced it.
#[derive(Debug, Serialize)]
pub struct AdListing {
    #[serde(flatten)]
    pub page: AdPage,
    pub query: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub category_choices: Vec<Choice>,
}

async fn find_ad(state: &AppState, id: DbId) -> AppResult<Ad> {
    AdRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Ad", id))
}

/// GET /api/v1/ads/create
pub async fn create_form(_user: AuthUser) -> Json<DataResponse<AdFormPage>> {
    Json(DataResponse::new(AdFormPage::new(None)))
}

/// POST /api/v1/ads/create
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<AdForm>, JsonRejection>,
) -> AppResult<Redirect> {
    let Json(form) = body.map_err(AppError::unreadable_form)?;
    let draft = validate_ad_form(&form).map_err(|errors| AppError::invalid_form(errors, &form))?;
    let ad = AdRepo::create(&state.pool, &CreateAd::from_draft(user.user_id, draft)).await?;

    tracing::info!(ad_id = ad.id, user_id = user.user_id, "Ad created");
    Ok(Redirect::to(AD_LIST_PATH))
}

/// GET /api/v1/ads/edit/{ad_id}
pub async fn edit_form(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ad_id): Path<DbId>,
) -> AppResult<Response> {
    let ad = find_ad(&state, ad_id).await?;
    if let Err(denied) = ensure_author(ad.user_id, user.user_id) {
        return Ok(MessagePage::from(denied).into_response());
    }
    Ok(Json(DataResponse::new(AdFormPage::new(Some(ad)))).into_response())
}

/// POST /api/v1/ads/edit/{ad_id}
pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ad_id): Path<DbId>,
    body: Result<Json<AdForm>, JsonRejection>,
) -> AppResult<Response> {
    let ad = find_ad(&state, ad_id).await?;
    if let Err(denied) = ensure_author(ad.user_id, user.user_id) {
        return Ok(MessagePage::from(denied).into_response());
    }

    // The body is only read once the actor is known to own the ad.
    let Json(form) = body.map_err(AppError::unreadable_form)?;
    let draft = validate_ad_form(&form).map_err(|errors| AppError::invalid_form(errors, &form))?;
    AdRepo::update(&state.pool, ad_id, &draft)
        .await?
        .ok_or(AppError::not_found("Ad", ad_id))?;

    tracing::info!(ad_id, user_id = user.user_id, "Ad updated");
    Ok(Redirect::to(AD_LIST_PATH).into_response())
}

/// GET /api/v1/ads/delete/{ad_id}
pub async fn delete_form(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ad_id): Path<DbId>,
) -> AppResult<Response> {
    let ad = find_ad(&state, ad_id).await?;
    if let Err(denied) = ensure_author(ad.user_id, user.user_id) {
        return Ok(MessagePage::from(denied).into_response());
    }
    Ok(Json(DataResponse::new(ad)).into_response())
}

/// POST /api/v1/ads/delete/{ad_id}
///
/// Removes the ad and every proposal that references it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ad_id): Path<DbId>,
) -> AppResult<Response> {
    let ad = find_ad(&state, ad_id).await?;
    if let Err(denied) = ensure_author(ad.user_id, user.user_id) {
        return Ok(MessagePage::from(denied).into_response());
    }

    if !AdRepo::delete(&state.pool, ad_id).await? {
        return Err(AppError::not_found("Ad", ad_id));
    }

    tracing::info!(ad_id, user_id = user.user_id, "Ad deleted");
    Ok(Redirect::to(AD_LIST_PATH).into_response())
}

/// GET /api/v1/ads/list
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<AdListParams>,
) -> AppResult<Json<DataResponse<AdListing>>> {
    let filter = AdFilter::from_params(
        params.q.as_deref(),
        params.category.as_deref(),
        params.condition.as_deref(),
    );
    let page = AdRepo::list_page(&state.pool, &filter, params.page.as_deref()).await?;

    Ok(Json(DataResponse::new(AdListing {
        page,
        query: params.q,
        category: params.category,
        condition: params.condition,
        category_choices: Category::choices(),
    })))
}
