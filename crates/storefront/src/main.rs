use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use storefront::{
    abstract_trait::media::DynMediaStore,
    di::DependenciesInjectDeps,
    handler::AppRouter,
    media::CloudinaryClient,
    state::AppState,
};
use tracing::{error, info};

const SERVICE_NAME: &str = "storefront";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init(SERVICE_NAME, &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;
    let _log_guard = init_logger(
        telemetry.logger_provider(),
        SERVICE_NAME,
        is_dev,
        is_enable_file,
    );

    info!("🚀 Starting storefront initialization...");

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let media = Arc::new(CloudinaryClient::new(config.cloudinary.clone())) as DynMediaStore;
    let deps = DependenciesInjectDeps::from_pool(pool, media);
    let state = AppState::new(deps, &config.jwt_secret);

    info!("✅ Application setup completed successfully.");

    let served = AppRouter::serve(config.port, &config.cors_origin, state).await;

    info!("🛑 Shutting down storefront...");

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    served.context("Failed to start server")
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("🗄️ Migrations applied");
    Ok(())
}
