use std::env;

use thiserror::Error;

/// Process configuration, built once in `main` and passed by injection.
/// Nothing reads environment variables after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds. Fixed at one hour unless overridden.
    pub token_ttl_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {0}")]
    Missing(String),
    #[error("Invalid value for {0}")]
    Invalid(&'static str),
}

const REQUIRED_VARS: &[&str] = &["JWT_SECRET", "DATABASE_URL"];

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(key).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing.join(", ")));
        }

        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let token_ttl_secs = match get("TOKEN_TTL_SECS") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS"))?,
            None => 3600,
        };

        Ok(Self {
            environment,
            port,
            database_url: get("DATABASE_URL").unwrap_or_default(),
            jwt_secret: get("JWT_SECRET").unwrap_or_default(),
            token_ttl_secs,
        })
    }
}
