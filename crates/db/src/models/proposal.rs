//! Exchange proposal entity model and DTOs.

use barter_core::proposal::ProposalStatus;
use barter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `exchange_proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExchangeProposal {
    pub id: DbId,
    pub ad_sender_id: DbId,
    pub ad_receiver_id: DbId,
    pub comment: String,
    #[sqlx(try_from = "String")]
    pub status: ProposalStatus,
    pub created_at: Timestamp,
}

/// A proposal joined with the titles of both ads, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProposalDetail {
    pub id: DbId,
    pub ad_sender_id: DbId,
    pub ad_receiver_id: DbId,
    pub comment: String,
    #[sqlx(try_from = "String")]
    pub status: ProposalStatus,
    pub created_at: Timestamp,
    pub sender_title: String,
    pub receiver_title: String,
}

impl ProposalDetail {
    /// Human-readable summary, e.g. `Proposal from Laptop to Books`.
    pub fn summary(&self) -> String {
        format!(
            "Proposal from {} to {}",
            self.sender_title, self.receiver_title
        )
    }
}

/// DTO for inserting a proposal. Status always starts as pending.
#[derive(Debug, Clone)]
pub struct CreateProposal {
    pub ad_sender_id: DbId,
    pub ad_receiver_id: DbId,
    pub comment: String,
}
