//! Seance Lobby - session management microservice for a ghost-hunting game
//!
//! This crate owns the authoritative roster and status of live game sessions:
//! creating lobbies, joining and leaving, per-player state updates, and item
//! pickups, all persisted through a revision-gated store so concurrent
//! requests against the same lobby never lose updates.

pub mod config;
pub mod error;
pub mod lobby;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and components
pub use error::{LobbyError, Result};
pub use lobby::{Lobby, LobbyService};
pub use store::{CasOutcome, InMemoryLobbyStore, LobbyStore};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
