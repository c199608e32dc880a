use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};

use super::validation::FieldError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A plaintext password candidate. Never logged and never persisted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, FieldError> {
        let len = raw.expose_secret().chars().count();
        if len == 0 {
            return Err(FieldError::new("password", "This field is required"));
        }
        if len < MIN_PASSWORD_LENGTH {
            return Err(FieldError::new(
                "password",
                format!("Minimum length is {MIN_PASSWORD_LENGTH}"),
            ));
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = FieldError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A PHC-formatted password digest as produced by the password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(digest: Secret<String>) -> Self {
        Self(digest)
    }

    /// Value bound into access tokens so that a password change invalidates them.
    ///
    /// The first 16 bytes of SHA-256 over the digest, hex encoded.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.expose_secret().as_bytes());
        hex::encode(&digest[..16])
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
