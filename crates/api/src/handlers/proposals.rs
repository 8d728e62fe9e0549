//! Handlers for the `/proposals` resource.
//!
//! Any authenticated user may propose an exchange between two ads or change
//! a proposal's status; ownership of the ads is not checked.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use barter_core::form::{Choice, Choices};
use barter_core::listing::ProposalFilter;
use barter_core::proposal::{
    requested_status, validate_proposal_form, ProposalForm, ProposalStatus, StatusForm,
};
use barter_core::types::DbId;
use barter_db::models::ad::Ad;
use barter_db::models::proposal::{CreateProposal, ExchangeProposal, ProposalDetail};
use barter_db::repositories::{AdRepo, ProposalRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ProposalListParams;
use crate::response::DataResponse;
use crate::routes::PROPOSAL_LIST_PATH;
use crate::state::AppState;

/// The two ads a new proposal would connect.
#[derive(Debug, Serialize)]
pub struct ProposalFormPage {
    pub ad_sender: Ad,
    pub ad_receiver: Ad,
}

/// A proposal and the statuses it may be moved to.
#[derive(Debug, Serialize)]
pub struct StatusFormPage {
    pub proposal: ExchangeProposal,
    pub status_choices: Vec<Choice>,
}

/// A listing row: the proposal, its ad titles and a display summary.
#[derive(Debug, Serialize)]
pub struct ProposalListItem {
    #[serde(flatten)]
    pub proposal: ProposalDetail,
    pub summary: String,
}

async fn find_ad_pair(
    state: &AppState,
    sender_ad_id: DbId,
    receiver_ad_id: DbId,
) -> AppResult<(Ad, Ad)> {
    let ad_sender = AdRepo::find_by_id(&state.pool, sender_ad_id)
        .await?
        .ok_or(AppError::not_found("Ad", sender_ad_id))?;
    let ad_receiver = AdRepo::find_by_id(&state.pool, receiver_ad_id)
        .await?
        .ok_or(AppError::not_found("Ad", receiver_ad_id))?;
    Ok((ad_sender, ad_receiver))
}

async fn find_proposal(state: &AppState, id: DbId) -> AppResult<ExchangeProposal> {
    ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ExchangeProposal", id))
}

/// GET /api/v1/proposals/create/{sender_ad_id}/{receiver_ad_id}
pub async fn create_form(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((sender_ad_id, receiver_ad_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ProposalFormPage>>> {
    let (ad_sender, ad_receiver) = find_ad_pair(&state, sender_ad_id, receiver_ad_id).await?;
    Ok(Json(DataResponse::new(ProposalFormPage {
        ad_sender,
        ad_receiver,
    })))
}

/// POST /api/v1/proposals/create/{sender_ad_id}/{receiver_ad_id}
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path((sender_ad_id, receiver_ad_id)): Path<(DbId, DbId)>,
    body: Result<Json<ProposalForm>, JsonRejection>,
) -> AppResult<Redirect> {
    let (ad_sender, ad_receiver) = find_ad_pair(&state, sender_ad_id, receiver_ad_id).await?;
    let Json(form) = body.map_err(AppError::unreadable_form)?;
    let comment =
        validate_proposal_form(&form).map_err(|errors| AppError::invalid_form(errors, &form))?;

    let proposal = ProposalRepo::create(
        &state.pool,
        &CreateProposal {
            ad_sender_id: ad_sender.id,
            ad_receiver_id: ad_receiver.id,
            comment,
        },
    )
    .await?;

    tracing::info!(
        proposal_id = proposal.id,
        ad_sender_id = ad_sender.id,
        ad_receiver_id = ad_receiver.id,
        user_id = user.user_id,
        "Exchange proposal created"
    );
    Ok(Redirect::to(PROPOSAL_LIST_PATH))
}

/// GET /api/v1/proposals/update/{proposal_id}
pub async fn update_form(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(proposal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<StatusFormPage>>> {
    let proposal = find_proposal(&state, proposal_id).await?;
    Ok(Json(DataResponse::new(StatusFormPage {
        proposal,
        status_choices: ProposalStatus::choices(),
    })))
}

/// POST /api/v1/proposals/update/{proposal_id}
///
/// An unrecognised status leaves the proposal untouched but still redirects
/// as if it had succeeded. So does a missing or unreadable body.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(proposal_id): Path<DbId>,
    body: Result<Json<StatusForm>, JsonRejection>,
) -> AppResult<Redirect> {
    find_proposal(&state, proposal_id).await?;

    let form = match body {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::debug!(proposal_id, error = %rejection, "Unreadable status form");
            StatusForm::default()
        }
    };

    match requested_status(&form) {
        Some(status) => {
            ProposalRepo::update_status(&state.pool, proposal_id, status)
                .await?
                .ok_or(AppError::not_found("ExchangeProposal", proposal_id))?;
            tracing::info!(
                proposal_id,
                %status,
                user_id = user.user_id,
                "Exchange proposal status updated"
            );
        }
        None => {
            tracing::debug!(
                proposal_id,
                requested = ?form.status,
                "Ignoring unrecognised proposal status"
            );
        }
    }

    Ok(Redirect::to(PROPOSAL_LIST_PATH))
}

/// GET /api/v1/proposals/list
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ProposalListParams>,
) -> AppResult<Json<DataResponse<Vec<ProposalListItem>>>> {
    let filter = ProposalFilter::from_params(
        params.sender.as_deref(),
        params.receiver.as_deref(),
        params.status.as_deref(),
    );
    let items = ProposalRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|proposal| ProposalListItem {
            summary: proposal.summary(),
            proposal,
        })
        .collect();

    Ok(Json(DataResponse::new(items)))
}
