//! Ad entity model and DTOs.

use barter_core::ad::{AdDraft, Category, Condition};
use barter_core::pagination::PageInfo;
use barter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ad {
    pub id: DbId,
    /// Owner of the ad.
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: Category,
    #[sqlx(try_from = "String")]
    pub condition: Condition,
    pub created_at: Timestamp,
}

/// DTO for inserting an ad on behalf of `user_id`.
#[derive(Debug, Clone)]
pub struct CreateAd {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
}

impl CreateAd {
    pub fn from_draft(user_id: DbId, draft: AdDraft) -> Self {
        Self {
            user_id,
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            category: draft.category,
            condition: draft.condition,
        }
    }
}

/// One page of an ad listing.
#[derive(Debug, Clone, Serialize)]
pub struct AdPage {
    pub items: Vec<Ad>,
    pub page: PageInfo,
}
