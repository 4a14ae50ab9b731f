//! # Tickdone API Server
//!
//! Web backend for the tickdone todo application, providing user
//! registration, email verification, and login.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tickdone-api
//! ```

use std::sync::Arc;
use tickdone_api::{
    app::{build_router, AppState},
    config::Config,
};
use tickdone_shared::{
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    email::ResendMailer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickdone_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tickdone API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Required secrets (pepper, public URL, Resend key) are validated here;
    // a missing one aborts startup before any request is served
    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let mailer = Arc::new(ResendMailer::new(
        config.email.resend_api_key.clone(),
        config.email.public_api_url.clone(),
        config.email.from_address.clone(),
    ));

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, mailer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete, exiting...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    } else {
        tracing::info!("Shutdown signal received");
    }
}
