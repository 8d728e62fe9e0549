use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use barter_core::error::CoreError;
use barter_core::form::FieldErrors;
use serde::Serialize;
use serde_json::json;

use crate::routes::LOGIN_PATH;

/// Key for errors that belong to the whole form rather than one field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `barter_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A submitted form failed validation. `form` echoes the submitted values.
    #[error("Form validation failed")]
    InvalidForm {
        errors: FieldErrors,
        form: serde_json::Value,
    },

    /// The route needs an authenticated user; `next` is the requested path.
    #[error("Login required for {next}")]
    LoginRequired { next: String },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build an [`AppError::InvalidForm`] echoing `form` back to the client.
    pub fn invalid_form<T: Serialize>(errors: FieldErrors, form: &T) -> Self {
        AppError::InvalidForm {
            errors,
            form: serde_json::to_value(form).unwrap_or(serde_json::Value::Null),
        }
    }

    /// A body that could not be read as the expected JSON form.
    ///
    /// Reported like any other invalid form, under the `__all__` key.
    pub fn unreadable_form(rejection: JsonRejection) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(NON_FIELD_ERRORS, rejection.body_text());
        AppError::InvalidForm {
            errors,
            form: serde_json::Value::Null,
        }
    }

    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: barter_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidForm { errors, form } => {
                let body = json!({
                    "error": "Submitted form is invalid",
                    "code": "VALIDATION_ERROR",
                    "errors": errors,
                    "form": form,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }

            AppError::LoginRequired { next } => {
                return Redirect::to(&login_redirect(&next)).into_response();
            }

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// `/api/v1/auth/login?next=<path>`, with `next` percent-encoded.
fn login_redirect(next: &str) -> String {
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Foreign key violations (a referenced ad vanished mid-request) map to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Referenced resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_next() {
        assert_eq!(
            login_redirect("/api/v1/ads/list"),
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fads%2Flist"
        );
    }

    #[test]
    fn test_login_redirect_encodes_query_characters() {
        assert_eq!(
            login_redirect("/api/v1/ads/list?q=a b&page=2"),
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fads%2Flist%3Fq%3Da%20b%26page%3D2"
        );
    }

    #[test]
    fn test_not_found_and_conflict_statuses() {
        let response = AppError::not_found("Ad", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            AppError::Core(CoreError::Conflict("taken".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::InternalError("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_form_is_unprocessable() {
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");
        let response = AppError::invalid_form(errors, &json!({"title": null})).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_login_required_is_see_other() {
        let response = AppError::LoginRequired {
            next: "/api/v1/ads/list".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fads%2Flist"
        );
    }
}
