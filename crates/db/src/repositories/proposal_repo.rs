//! Repository for the `exchange_proposals` table.

use barter_core::listing::ProposalFilter;
use barter_core::proposal::ProposalStatus;
use barter_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::proposal::{CreateProposal, ExchangeProposal, ProposalDetail};

const COLUMNS: &str = "id, ad_sender_id, ad_receiver_id, comment, status, created_at";

/// Columns for [`ProposalDetail`], joined against both ads as `s` and `r`.
const DETAIL_COLUMNS: &str = "p.id, p.ad_sender_id, p.ad_receiver_id, p.comment, p.status, \
     p.created_at, s.title AS sender_title, r.title AS receiver_title";

/// Provides create, status update, and listing operations for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a new pending proposal, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateProposal,
    ) -> Result<ExchangeProposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO exchange_proposals \
                (ad_sender_id, ad_receiver_id, comment, status, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExchangeProposal>(&query)
            .bind(input.ad_sender_id)
            .bind(input.ad_receiver_id)
            .bind(&input.comment)
            .bind(ProposalStatus::Pending.to_string())
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<ExchangeProposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exchange_proposals WHERE id = ?");
        sqlx::query_as::<_, ExchangeProposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a proposal's status. Any status may follow any other.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &SqlitePool,
        id: DbId,
        status: ProposalStatus,
    ) -> Result<Option<ExchangeProposal>, sqlx::Error> {
        let query = format!(
            "UPDATE exchange_proposals SET status = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExchangeProposal>(&query)
            .bind(status.to_string())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every proposal matching `filter`, in creation order. Not paginated.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ProposalFilter,
    ) -> Result<Vec<ProposalDetail>, sqlx::Error> {
        if filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }

        let mut conditions = Vec::new();
        if filter.sender.value().is_some() {
            conditions.push("p.ad_sender_id = ?");
        }
        if filter.receiver.value().is_some() {
            conditions.push("p.ad_receiver_id = ?");
        }
        if filter.status.value().is_some() {
            conditions.push("p.status = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM exchange_proposals p \
             JOIN ads s ON s.id = p.ad_sender_id \
             JOIN ads r ON r.id = p.ad_receiver_id \
             {where_clause} \
             ORDER BY p.id ASC"
        );

        let mut q = sqlx::query_as::<_, ProposalDetail>(&query);
        if let Some(sender) = filter.sender.value() {
            q = q.bind(*sender);
        }
        if let Some(receiver) = filter.receiver.value() {
            q = q.bind(*receiver);
        }
        if let Some(status) = filter.status.value() {
            q = q.bind(status.to_string());
        }
        q.fetch_all(pool).await
    }
}
