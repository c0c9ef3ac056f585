use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authentication guard: verifies the bearer token and attaches the identity
/// claims to the request. Performs no database access.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        bearer_token(request.headers()).ok_or(ApiError::Unauthorized("Unauthorized"))?;

    let claims = auth::verify_token(&state.config.jwt_secret, token).map_err(|err| {
        tracing::debug!(%err, "token verification failed");
        ApiError::Unauthorized("Unauthorized")
    })?;

    request.extensions_mut().insert::<Claims>(claims);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.trim().is_empty())
}
