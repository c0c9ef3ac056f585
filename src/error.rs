// HTTP API error taxonomy and the single boundary responder.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Closed set of failure kinds the API can surface. The `IntoResponse` impl
/// below is the only place a kind is mapped to a status code and payload.
#[derive(Debug, Error)]
pub enum ApiError {
    // 401
    #[error("{0}")]
    Unauthorized(&'static str),

    // 403
    #[error("Forbidden")]
    Forbidden,

    // 400, structured field-level detail
    #[error("Validation failed")]
    Validation(FieldErrors),

    // 404
    #[error("{0} not found")]
    NotFound(&'static str),

    // 409
    #[error("{0} already exists")]
    Conflict(&'static str),

    // 500, detail is logged server-side and never sent to the caller
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Translate a storage-layer failure into a domain error. Unique-constraint
/// violations (SQLSTATE 23505) become Conflict; everything else propagates as
/// Internal. Row absence is handled by the services via `fetch_optional`.
pub fn map_db_err(err: sqlx::Error, entity: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        return ApiError::Conflict(entity);
    }
    ApiError::Internal(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                json!({ "message": "Internal server error" })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
