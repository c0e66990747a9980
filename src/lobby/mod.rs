//! Lobby domain: snapshot state machine and the service that persists it

pub mod service;
pub mod state;

pub use service::{LobbyService, LobbyServiceStats, DEFAULT_MAX_SWAP_RETRIES};
pub use state::Lobby;
