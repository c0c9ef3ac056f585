use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::models::UserPublic;
use crate::services::{CredentialsDto, LoginResponse};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<CredentialsDto>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError> {
    let user = state.auth.register(&dto.email, &dto.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<CredentialsDto>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state.auth.login(&dto.email, &dto.password).await?;
    Ok(Json(result))
}
