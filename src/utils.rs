//! Utility functions for the lobby service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique lobby ID
pub fn generate_lobby_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Clamp a sanity value into the valid [0, 100] range
pub fn clamp_sanity(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
