mod app_service;
mod helpers;
mod tracing;

pub use app_service::ShelfService;
pub use helpers::{configure_postgresql, get_postgres_pool, run_migrations};
pub use tracing::init_tracing;
