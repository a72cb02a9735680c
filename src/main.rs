use churchsite::{
    build_router,
    config::{validate_production_config, AppConfig, SessionConfig},
    db, AppState, AssetDirs,
};

use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "churchsite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    validate_production_config(&config)?;
    tracing::info!("Starting in {} mode", config.mode.as_str());

    if config.uses_default_admin_password() {
        tracing::warn!("ADMIN_PASSWORD is not set; the default admin password is in use");
    }

    std::fs::create_dir_all(&config.uploads_dir)?;

    // Database connection, schema and seed data
    let pool = db::create_pool(&config.database_url).await?;
    db::initialize(&pool, &config.admin_password).await?;

    // Session store
    let session_store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .map_err(anyhow::Error::msg)?;
    session_store.migrate().await?;
    let session_layer = SessionConfig::from_config(&config).create_layer(session_store);

    let app = build_router(
        AppState::new(pool),
        session_layer,
        config.mode,
        AssetDirs {
            static_dir: &config.static_dir,
            uploads_dir: &config.uploads_dir,
        },
    );

    let addr = config.bind_addr();
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
