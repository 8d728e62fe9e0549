//! Repository for the `ads` table.

use barter_core::ad::AdDraft;
use barter_core::listing::AdFilter;
use barter_core::pagination::{Paginator, ADS_PER_PAGE};
use barter_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::ad::{Ad, AdPage, CreateAd};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, title, description, image_url, category, condition, created_at";

/// Provides CRUD and listing operations for ads.
pub struct AdRepo;

impl AdRepo {
    /// Insert a new ad, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateAd) -> Result<Ad, sqlx::Error> {
        let query = format!(
            "INSERT INTO ads \
                (user_id, title, description, image_url, category, condition, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.image_url.as_deref())
            .bind(input.category.to_string())
            .bind(input.condition.to_string())
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads WHERE id = ?");
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every editable field of an ad. Owner and `created_at` never change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &AdDraft,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET \
                title = ?, \
                description = ?, \
                image_url = ?, \
                category = ?, \
                condition = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.image_url.as_deref())
            .bind(input.category.to_string())
            .bind(input.condition.to_string())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ad together with every proposal that references it.
    ///
    /// Both deletes run in one transaction. Returns `true` if the ad existed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let proposals = sqlx::query(
            "DELETE FROM exchange_proposals WHERE ad_sender_id = ? OR ad_receiver_id = ?",
        )
        .bind(id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let ads = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            ad_id = id,
            proposals_removed = proposals.rows_affected(),
            "Ad deleted"
        );
        Ok(ads.rows_affected() > 0)
    }

    /// List one page of ads matching `filter`, in creation order.
    ///
    /// `page` is the raw page parameter; see [`Paginator::page`] for how it is
    /// resolved.
    pub async fn list_page(
        pool: &SqlitePool,
        filter: &AdFilter,
        page: Option<&str>,
    ) -> Result<AdPage, sqlx::Error> {
        if filter.is_unsatisfiable() {
            return Ok(AdPage {
                items: Vec::new(),
                page: Paginator::new(0, ADS_PER_PAGE).page(page),
            });
        }

        let where_clause = where_clause(filter);
        let pattern = filter.text.as_deref().map(text_pattern);

        let count_query = format!("SELECT COUNT(*) FROM ads {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(pattern) = &pattern {
            count = count.bind(pattern).bind(pattern);
        }
        if let Some(category) = filter.category.value() {
            count = count.bind(category.to_string());
        }
        if let Some(condition) = filter.condition.value() {
            count = count.bind(condition.to_string());
        }
        let total_count = count.fetch_one(pool).await?;

        let page = Paginator::new(total_count, ADS_PER_PAGE).page(page);

        let query = format!(
            "SELECT {COLUMNS} FROM ads {where_clause} \
             ORDER BY id ASC \
             LIMIT ? OFFSET ?"
        );
        let mut q = sqlx::query_as::<_, Ad>(&query);
        if let Some(pattern) = &pattern {
            q = q.bind(pattern).bind(pattern);
        }
        if let Some(category) = filter.category.value() {
            q = q.bind(category.to_string());
        }
        if let Some(condition) = filter.condition.value() {
            q = q.bind(condition.to_string());
        }
        let items = q
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(AdPage { items, page })
    }
}

/// Case-insensitive (Unicode-aware) regex matching `text` literally.
fn text_pattern(text: &str) -> String {
    format!("(?i){}", regex::escape(text))
}

/// Build the WHERE clause for `filter`.
///
/// Placeholders appear in a fixed order (text twice, category, condition)
/// and callers must bind in that same order.
fn where_clause(filter: &AdFilter) -> String {
    let mut conditions = Vec::new();

    if filter.text.is_some() {
        conditions.push(
            "(title REGEXP ? OR description REGEXP ?)",
        );
    }
    if filter.category.value().is_some() {
        conditions.push("category = ?");
    }
    if filter.condition.value().is_some() {
        conditions.push("condition = ?");
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}
