use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    password::{Password, PasswordHash},
    role::Role,
    user::{User, UserId},
};

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashingError(pub String);

/// Salted, slow password digests.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError>;
    /// Malformed digests verify as `false` rather than erroring.
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}

/// Everything an access token asserts about its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub binding: String,
}

impl TokenSubject {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            role: user.role,
            binding: user.password_hash.fingerprint(),
        }
    }
}

/// Verified token contents. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    pub email: String,
    pub role: Role,
    pub binding: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Failed to issue token: {0}")]
    Issue(String),
}

impl PartialEq for TokenError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidToken, Self::InvalidToken) | (Self::Issue(_), Self::Issue(_))
        )
    }
}

/// Issues and verifies signed, time-bounded access tokens.
pub trait TokenService: Send + Sync {
    fn issue(&self, subject: &TokenSubject) -> Result<AccessToken, TokenError>;
    /// Fails with `InvalidToken` on a bad signature, a malformed token or expiry.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
