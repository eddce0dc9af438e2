//! System API endpoints.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, SystemStatus};

/// Returns version, uptime, and storage health for the running instance.
///
/// # Endpoint
/// `GET /api/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SystemStatus>, ApiError> {
    let database = if state.store.ping().await.is_ok() {
        "ok"
    } else {
        "unreachable"
    };

    let total_users = state
        .store
        .count_users()
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    let total_readings = state
        .store
        .count_readings()
        .await
        .map_err(|e| ApiError::database("An error occurred", e.to_string()))?;

    Ok(Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        total_users,
        total_readings,
        database: database.to_string(),
    }))
}
