use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{self, Claims};
use crate::config::AppConfig;
use crate::error::{map_db_err, ApiError};
use crate::models::{User, UserPublic};

#[derive(Debug, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserPublic,
    pub token: String,
}

/// Registration and login. Issues the signed, time-bound tokens the
/// authentication guard later verifies.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self { pool, config }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<UserPublic, ApiError> {
        let password_hash =
            auth::hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "User"))?;

        Ok(user.into())
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "User"))?
            .ok_or(ApiError::Unauthorized("Invalid credentials"))?;

        if !auth::verify_password(password, &user.password_hash) {
            return Err(ApiError::Unauthorized("Invalid credentials"));
        }

        let claims = Claims::new(user.id, user.email.clone(), self.config.token_ttl_secs);
        let token = auth::issue_token(&self.config.jwt_secret, &claims)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(LoginResponse {
            user: user.into(),
            token,
        })
    }
}
