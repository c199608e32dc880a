use color_eyre::eyre::Result;
use shelf_adapters::{
    Argon2Hasher, JwtScheme, PostgresBookStore, PostgresUserStore, config::Settings,
};
use shelf_axum::AppState;
use shelf_service::{ShelfService, configure_postgresql, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // A missing or empty JWT secret stops startup here.
    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings.database).await?;

    let user_store = PostgresUserStore::new(pg_pool.clone());
    let book_store = PostgresBookStore::new(pg_pool);
    let scheme = JwtScheme::new(user_store, Argon2Hasher::new(), settings.jwt_auth_config());

    let service = ShelfService::new(AppState::new(scheme, book_store));

    let listener = TcpListener::bind(settings.application.address()).await?;
    tracing::info!(name = %settings.application.name, "Starting shelf API");

    service
        .run_standalone(listener, Some(settings.cors.allowed_origins))
        .await?;

    Ok(())
}
