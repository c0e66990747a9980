//! Health check and service statistics endpoints

use crate::service::app::AppState;
use crate::utils::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{debug, error};

/// `GET /health` - liveness probe backed by a storage round trip
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");

    match state.store.count().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "OK",
                "service": state.service_name,
                "timestamp": current_timestamp(),
            })),
        ),
        Err(e) => {
            error!("Health check storage probe failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "ERROR",
                    "service": state.service_name,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// `GET /stats` - service counters for debugging and monitoring
pub async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Stats endpoint requested");

    let stats = state.lobby_service.stats();

    match state.store.count().await {
        Ok(stored) => (
            StatusCode::OK,
            Json(json!({
                "service": {
                    "name": state.service_name,
                    "version": crate::VERSION,
                },
                "lobbies": {
                    "stored": stored,
                    "created": stats.lobbies_created,
                },
                "operations": {
                    "applied": stats.operations_applied,
                    "swap_conflicts": stats.swap_conflicts,
                    "swap_retries_exhausted": stats.swap_retries_exhausted,
                },
                "timestamp": current_timestamp(),
            })),
        ),
        Err(e) => {
            error!("Failed to gather stats: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "service": {
                        "name": state.service_name,
                        "version": crate::VERSION,
                    },
                    "error": e.to_string(),
                    "timestamp": current_timestamp(),
                })),
            )
        }
    }
}
