//! Token issuing/verification and password hashing.
//!
//! Identity is wholly reconstructed from the token's signed contents; there is
//! no session store to consult.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity claims carried by a bearer token, attached to the request for the
/// duration of one request/response cycle only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: Uuid, email: String, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub,
            email,
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

pub fn issue_token(secret: &str, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// One-way adaptive hash of a password for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Constant result shape: any parse or verify failure is just "no match".
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-signing";

    #[test]
    fn token_round_trips() {
        let sub = Uuid::new_v4();
        let claims = Claims::new(sub, "a@b.com".into(), 3600);
        let token = issue_token(SECRET, &claims).unwrap();

        let verified = verify_token(SECRET, &token).unwrap();
        assert_eq!(verified.sub, sub);
        assert_eq!(verified.email, "a@b.com");
        assert_eq!(verified.exp, verified.iat + 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Two hours past expiry, well beyond the default leeway.
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".into(), -7200);
        let token = issue_token(SECRET, &claims).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".into(), 3600);
        let token = issue_token(SECRET, &claims).unwrap();
        assert!(verify_token("some-other-secret", &token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".into(), 3600);
        let mut token = issue_token(SECRET, &claims).unwrap();
        token.push('x');
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
