pub mod bearer_validator;
pub mod jwt_tokens;

pub use bearer_validator::BearerTokenValidator;
pub use jwt_tokens::{Claims, DEFAULT_TOKEN_TTL_IN_SECONDS, JwtAuthConfig, JwtTokenService};
