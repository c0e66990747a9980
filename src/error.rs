//! Error types for the lobby service
//!
//! Every business-rule violation is expressed as a typed `LobbyError` value
//! and resolved inside the state machine; errors never cross the API boundary
//! as panics. Display strings double as the `{error: ...}` response bodies,
//! so they are part of the wire contract.

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LobbyError>;

/// Error taxonomy for lobby operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum LobbyError {
    /// Malformed or missing request fields
    #[error("{reason}")]
    InvalidArgument { reason: String },

    /// The addressed lobby does not exist
    #[error("Lobby not found")]
    LobbyNotFound { lobby_id: String },

    /// The addressed player is not part of the lobby roster
    #[error("Player not found in lobby")]
    PlayerNotFound { user_id: String },

    /// A leave request named a user that never joined
    #[error("User not in lobby")]
    NotMember { user_id: String },

    /// A join request named a user already on the roster
    #[error("User already in lobby")]
    AlreadyMember { user_id: String },

    /// The lobby is at capacity
    #[error("Lobby is full")]
    LobbyFull { lobby_id: String },

    /// The lobby is not accepting joins in its current status
    #[error("Lobby is not open for joining")]
    NotOpen { lobby_id: String },

    /// A lobby with this identifier already exists in the store
    #[error("Lobby already exists")]
    AlreadyExists { lobby_id: String },

    /// Conditional-write retries were exhausted under concurrent updates
    #[error("Lobby is being updated concurrently, retry later")]
    Contention { lobby_id: String },

    /// The underlying store is unreachable or inconsistent
    #[error("Storage failure: {message}")]
    Storage { message: String },
}

impl LobbyError {
    /// Convenience constructor for missing/empty request fields
    pub fn missing_fields() -> Self {
        LobbyError::InvalidArgument {
            reason: "Missing required fields".to_string(),
        }
    }
}
