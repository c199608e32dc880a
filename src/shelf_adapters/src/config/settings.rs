use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT, ENV_OVERRIDE_PREFIX, ENV_OVERRIDE_SEPARATOR, env,
};
use crate::auth_validation::{DEFAULT_TOKEN_TTL_IN_SECONDS, JwtAuthConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JWT secret must not be empty")]
    EmptyJwtSecret,
    #[error("JWT ttl must be positive, got {0}")]
    NonPositiveTokenTtl(i64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
}

pub type AllowedOrigins = Vec<String>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl Settings {
    /// Loads `.env`, then layers `<dir>/base.*`, `<dir>/<APP_ENV>.*` and
    /// `APP__`-prefixed variables. `JWT_SECRET` and `DATABASE_URL` win
    /// over everything else.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(env::APP_CONFIG_DIR_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_owned());
        let environment = std::env::var(env::APP_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let builder = Config::builder()
            .add_source(File::with_name(&format!("{config_dir}/base")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(ENV_OVERRIDE_PREFIX)
                    .prefix_separator(ENV_OVERRIDE_SEPARATOR)
                    .separator(ENV_OVERRIDE_SEPARATOR),
            )
            .set_override_option("jwt.secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option(
                "database.url",
                std::env::var(env::DATABASE_URL_ENV_VAR).ok(),
            )?;

        Self::build(builder)
    }

    /// Finishes a builder: applies defaults, deserializes and validates.
    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder
            .set_default("application.name", "shelf")?
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.ttl_seconds", DEFAULT_TOKEN_TTL_IN_SECONDS)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.jwt.secret.expose_secret().trim().is_empty() {
            return Err(SettingsError::EmptyJwtSecret);
        }
        if self.jwt.ttl_seconds <= 0 {
            return Err(SettingsError::NonPositiveTokenTtl(self.jwt.ttl_seconds));
        }
        Ok(())
    }

    pub fn jwt_auth_config(&self) -> JwtAuthConfig {
        JwtAuthConfig {
            jwt_secret: self.jwt.secret.clone(),
            token_ttl_in_seconds: self.jwt.ttl_seconds,
        }
    }
}
