use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, DrinkStore, MemoryDrinkStore, PgDrinkStore};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep drinks in process memory instead of PostgreSQL")]
    pub memory: bool,

    #[arg(long, conflicts_with = "memory", help = "Drop and recreate the drink table, seeding one drink")]
    pub reset_db: bool,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let store = open_store(&args, &config).await?;
    let verifier = TokenVerifier::from_config(&config.auth).context("invalid auth configuration")?;
    let state = AppState::new(store.clone(), verifier);

    let app = crate::app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Drink menu API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn open_store(args: &ServeArgs, config: &AppConfig) -> anyhow::Result<Arc<dyn DrinkStore>> {
    if args.memory {
        tracing::info!("Using in-memory drink store");
        return Ok(Arc::new(MemoryDrinkStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;

    if args.reset_db {
        DatabaseManager::reset(&pool).await.context("failed to reset drink table")?;
    }

    Ok(Arc::new(PgDrinkStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
