/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tickdone_api::{app::AppState, config::Config};
/// use tickdone_shared::email::ResendMailer;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let mailer = Arc::new(ResendMailer::new(
///     config.email.resend_api_key.clone(),
///     config.email.public_api_url.clone(),
///     config.email.from_address.clone(),
/// ));
/// let state = AppState::new(pool, config, mailer);
/// let app = tickdone_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tickdone_shared::email::VerificationMailer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning; the pool is already reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Verification email dispatcher (Resend in production, mock in tests)
    pub mailer: Arc<dyn VerificationMailer>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, mailer: Arc<dyn VerificationMailer>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }

    /// Gets the process-wide pepper for password operations
    pub fn pepper(&self) -> &str {
        &self.config.security.pepper
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /verify                   # GET - email verification link target
/// └── /v1/                      # API v1 (versioned)
///     └── /auth/
///         ├── POST /register    # Start a registration (pending until verified)
///         └── POST /login       # Authenticate an active user
/// ```
///
/// `/verify` sits at the root because it is the target of the link mailed to
/// users (`{PUBLIC_API_URL}/verify?token=…`).
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public by nature)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let v1_routes = Router::new().nest("/auth", auth_routes);

    Router::new()
        .merge(health_routes)
        .route("/verify", get(routes::verify::verify))
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
