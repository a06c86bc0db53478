use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use urm_api::{create_app, telemetry, AppState};
use urm_core::services::{
    BcryptPasswordHasher, KeyProvider, RevocationCleanupConfig, RevocationCleanupService,
    TokenServiceConfig,
};
use urm_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        "Starting user and role administration API"
    );

    // Bad key material must abort startup, not the first request
    let keys = Arc::new(KeyProvider::from_config(&config.jwt));
    keys.warm_up().context("JWT key material is unusable")?;

    let state = AppState::new(
        keys,
        TokenServiceConfig::from(&config.jwt),
        BcryptPasswordHasher::default(),
    )
    .context("Failed to build application state")?;
    state
        .initialize()
        .await
        .context("Failed to seed the role catalog")?;

    let cleanup = Arc::new(RevocationCleanupService::new(
        state.tokens.revocations(),
        RevocationCleanupConfig::from(&config.jwt),
    ));
    let cleanup_task = cleanup.start_background_task();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_state = web::Data::new(state);
    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}
