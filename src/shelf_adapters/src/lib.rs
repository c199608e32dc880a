pub mod auth_validation;
pub mod authentication;
pub mod config;
pub mod persistence;

pub use auth_validation::{BearerTokenValidator, JwtAuthConfig, JwtTokenService};
pub use authentication::{Argon2Hasher, JwtScheme};
pub use persistence::{HashMapBookStore, HashMapUserStore, PostgresBookStore, PostgresUserStore};
