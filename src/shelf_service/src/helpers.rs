use secrecy::ExposeSecret;
use shelf_adapters::config::DatabaseSettings;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects to Postgres and applies pending migrations.
///
/// # Errors
///
/// Fails if the database is unreachable or a migration does not apply.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await?;

    run_migrations(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

pub async fn run_migrations(pg_pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!().run(pg_pool).await?;
    Ok(())
}
