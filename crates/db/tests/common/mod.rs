#![allow(dead_code)]

use barter_core::ad::{Category, Condition};
use barter_db::models::ad::{Ad, CreateAd};
use barter_db::models::user::{CreateUser, User};
use barter_db::repositories::{AdRepo, UserRepo};
use barter_db::DbPool;
use tempfile::TempDir;

/// A migrated database in a temporary directory.
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the database file.
pub struct TestDb {
    _dir: TempDir,
    pub pool: DbPool,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("barter.db").display());
    let pool = barter_db::create_pool(&url, 5)
        .await
        .expect("pool creation should succeed");
    barter_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    TestDb { _dir: dir, pool }
}

pub async fn create_user(pool: &DbPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

pub async fn create_ad(
    pool: &DbPool,
    user_id: i64,
    title: &str,
    description: &str,
    category: Category,
    condition: Condition,
) -> Ad {
    AdRepo::create(
        pool,
        &CreateAd {
            user_id,
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
            category,
            condition,
        },
    )
    .await
    .expect("ad creation should succeed")
}
