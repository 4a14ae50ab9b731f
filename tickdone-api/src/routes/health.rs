/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// Liveness probe for a tickdone deployment. Every auth workflow is dead
/// without the account stores, so an unreachable database degrades the
/// overall status rather than reporting a separate partial state.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tickdone_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when the account stores are reachable, `degraded` otherwise
    pub status: String,

    /// Version of the running API server
    pub version: String,

    /// Account-store connectivity: `connected` or `disconnected`
    pub database: String,
}

/// Health check handler
///
/// Probes the database through the shared pool health check; never fails the
/// request itself, so monitors always get a parseable body.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_ok = pool::health_check(&state.db).await.is_ok();

    Ok(Json(HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
    }))
}
