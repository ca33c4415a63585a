//! # Corkboard API Server
//!
//! HTTP server for the Corkboard task board: users own boards, boards hold
//! ordered lists, lists hold ordered cards.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment (and `.env`)
//! 2. Create the database if needed, open the pool, run migrations
//! 3. Seed the first superuser when configured
//! 4. Serve until Ctrl+C, then drain and close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p corkboard-api
//! ```

use std::sync::Arc;

use anyhow::Context;
use corkboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use corkboard_shared::{
    auth::authenticator::JwtAuthenticator,
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool},
    },
    service::BoardService,
    store::postgres::PgStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "corkboard_api=debug,corkboard_shared=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Corkboard API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url)
        .await
        .context("Failed to create database")?;
    let pool = create_pool(config.pool_config())
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let authenticator = JwtAuthenticator::new(config.jwt.secret.clone(), config.token_ttl());
    let service = BoardService::new(Arc::new(PgStore::new(pool.clone())), Arc::new(authenticator));

    if let Some(superuser) = &config.superuser {
        let user = service
            .ensure_superuser(&superuser.email, &superuser.username, &superuser.password)
            .await
            .context("Failed to seed first superuser")?;
        tracing::info!(user_id = %user.id, email = %user.email, "First superuser ready");
    }

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(service, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, closing database pool...");
    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
