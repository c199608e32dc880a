pub mod env {
    pub const APP_ENV_VAR: &str = "APP_ENV";
    pub const APP_CONFIG_DIR_ENV_VAR: &str = "APP_CONFIG_DIR";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
}

/// Prefix of environment variables that override config file values,
/// e.g. `APP__APPLICATION__PORT=8080`.
pub const ENV_OVERRIDE_PREFIX: &str = "APP";
pub const ENV_OVERRIDE_SEPARATOR: &str = "__";

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub const API_PREFIX: &str = "/api/v1";

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
