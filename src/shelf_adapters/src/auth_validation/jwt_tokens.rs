use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use shelf_core::{AccessToken, Role, TokenClaims, TokenError, TokenService, TokenSubject, UserId};

pub const DEFAULT_TOKEN_TTL_IN_SECONDS: i64 = 60 * 60 * 24;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 access tokens.
///
/// Verification pins the algorithm, so a token declaring any other `alg`
/// is rejected.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtAuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(config: JwtAuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.as_bytes()),
            config,
            validation,
        }
    }

    pub fn token_ttl_in_seconds(&self) -> i64 {
        self.config.token_ttl_in_seconds
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Fingerprint of the password hash the token was issued against.
    pub pwd: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &TokenSubject) -> Result<AccessToken, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds)
            .ok_or_else(|| TokenError::Issue("Failed to create auth token duration".to_owned()))?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or_else(|| TokenError::Issue("Duration out of range".to_owned()))?
            .timestamp();

        let claims = Claims {
            sub: subject.id.to_string(),
            email: subject.email.clone(),
            role: subject.role,
            pwd: subject.binding.clone(),
            iat: now.timestamp(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token failed to decode");
                TokenError::InvalidToken
            })?;

        // The library accepts exp == now; a token is dead from its expiry second on.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::InvalidToken);
        }

        let subject = claims
            .sub
            .parse::<i64>()
            .ok()
            .and_then(|id| UserId::new(id).ok())
            .ok_or(TokenError::InvalidToken)?;

        Ok(TokenClaims {
            subject,
            email: claims.email,
            role: claims.role,
            binding: claims.pwd,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
