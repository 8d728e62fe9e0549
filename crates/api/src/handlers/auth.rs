//! Handlers for the `/auth` resource (register, login, current user).

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use barter_core::account::{validate_registration, RegistrationForm};
use barter_core::error::CoreError;
use barter_db::models::user::{CreateUser, User};
use barter_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NextParams;
use crate::response::DataResponse;
use crate::routes::LOGIN_PATH;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// Payload of `GET /auth/login`, the target of login redirects.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub message: &'static str,
    /// Path to return to after logging in.
    pub next: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account, then redirect to the login route.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> AppResult<Redirect> {
    // Passwords are never echoed back.
    let account = validate_registration(&form)
        .map_err(|errors| AppError::invalid_form(errors, &json!({ "username": form.username })))?;

    if UserRepo::find_by_username(&state.pool, &account.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with that username already exists.".into(),
        )));
    }

    let password_hash = hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: account.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(Redirect::to(LOGIN_PATH))
}

/// GET /api/v1/auth/login
pub async fn login_form(Query(params): Query<NextParams>) -> Json<DataResponse<LoginPage>> {
    Json(DataResponse::new(LoginPage {
        message: "Log in with your username and password.",
        next: params.next,
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    Ok(Json(DataResponse::new(user)))
}
