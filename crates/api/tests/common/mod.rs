#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use barter_api::auth::jwt::{generate_access_token, JwtConfig};
use barter_api::auth::password::hash_password;
use barter_api::config::ServerConfig;
use barter_api::router::build_app_router;
use barter_api::state::AppState;
use barter_core::ad::{Category, Condition};
use barter_db::models::ad::{Ad, CreateAd};
use barter_db::models::proposal::{CreateProposal, ExchangeProposal};
use barter_db::models::user::{CreateUser, User};
use barter_db::repositories::{AdRepo, ProposalRepo, UserRepo};
use barter_db::DbPool;

/// Password given to every user made by [`TestApp::create_user`].
pub const TEST_PASSWORD: &str = "swap-meet-2026";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(database_url: String) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url,
        database_max_connections: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The full application over a fresh, migrated SQLite database.
///
/// Keep it alive for the whole test; dropping it removes the database file.
pub struct TestApp {
    _dir: TempDir,
    pub pool: DbPool,
    pub config: ServerConfig,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = format!("sqlite://{}", dir.path().join("barter.db").display());
        let config = test_config(url);

        let pool = barter_db::create_pool(&config.database_url, config.database_max_connections)
            .await
            .expect("pool creation should succeed");
        barter_db::run_migrations(&pool)
            .await
            .expect("migrations should apply");

        let state = AppState {
            pool: pool.clone(),
            config: Arc::new(config.clone()),
        };
        let router = build_app_router(state, &config);

        Self {
            _dir: dir,
            pool,
            config,
            router,
        }
    }

    /// A fresh handle on the router; `oneshot` consumes it.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Insert a user with [`TEST_PASSWORD`] and return it with a bearer token.
    pub async fn create_user(&self, username: &str) -> (User, String) {
        let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
        let user = UserRepo::create(
            &self.pool,
            &CreateUser {
                username: username.to_string(),
                password_hash,
            },
        )
        .await
        .expect("user creation should succeed");
        let token = generate_access_token(user.id, &user.username, &self.config.jwt)
            .expect("token generation should succeed");
        (user, token)
    }

    pub async fn create_ad(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
        category: Category,
        condition: Condition,
    ) -> Ad {
        AdRepo::create(
            &self.pool,
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

    pub async fn create_proposal(
        &self,
        sender: &Ad,
        receiver: &Ad,
        comment: &str,
    ) -> ExchangeProposal {
        ProposalRepo::create(
            &self.pool,
            &CreateProposal {
                ad_sender_id: sender.id,
                ad_receiver_id: receiver.id,
                comment: comment.to_string(),
            },
        )
        .await
        .expect("proposal creation should succeed")
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("Location should be ASCII")
}

/// Assert a `303 See Other` to `target`.
pub fn assert_redirect(response: &Response, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), target);
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with no body, as the delete confirmation does.
pub async fn post_empty_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}
