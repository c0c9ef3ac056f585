use axum::{
    body::{to_bytes, Body},
    extract::{RawPathParams, Request, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{FieldErrors, Schema};

// Matches the framework default body cap; validation never needs more.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Validation guard: checks the raw JSON body against a schema and hands the
/// normalized value to the handler. Purely syntactic; the handler never sees
/// an invalid or un-normalized body.
pub async fn validate_body(
    State(schema): State<&'static Schema>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| generic_failure())?;
    if bytes.is_empty() {
        return Err(generic_failure());
    }
    let raw: Value = serde_json::from_slice(&bytes).map_err(|_| generic_failure())?;

    let normalized = schema.validate(&raw).map_err(ApiError::Validation)?;
    let bytes =
        serde_json::to_vec(&normalized).map_err(|e| ApiError::Internal(e.to_string()))?;

    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

fn generic_failure() -> ApiError {
    ApiError::Validation(FieldErrors::single("body", "Validation failed"))
}

/// Companion path validator: `store_id` must be a well-formed UUID and `id` a
/// positive integer. Runs before authorization so malformed identifiers never
/// trigger a membership lookup.
pub async fn validate_path(
    params: RawPathParams,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let mut errors = FieldErrors::new();

    for (name, value) in &params {
        match name {
            "store_id" => {
                if Uuid::parse_str(value).is_err() {
                    errors.push(name, "Invalid ID");
                }
            }
            "id" => {
                if !value.parse::<i64>().map(|id| id >= 1).unwrap_or(false) {
                    errors.push(name, "Invalid ID");
                }
            }
            _ => {}
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(next.run(request).await)
}
