//! Common types used throughout the lobby service
//!
//! This module holds the wire-facing request and response structures along
//! with the shared identifier aliases. Response field names are part of the
//! public contract consumed by the game client, so the camelCase renames here
//! are deliberate and must not drift.

use crate::lobby::state::Lobby;
use serde::{Deserialize, Serialize};

/// Unique identifier for lobbies (UUID v4, hyphenated string form)
pub type LobbyId = String;

/// Unique identifier for users
pub type UserId = String;

/// Unique identifier for maps, owned by the map catalog service
pub type MapId = String;

/// Unique identifier for inventory items, owned by the inventory service
pub type InventoryId = String;

/// Lifecycle status of a lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LobbyStatus {
    /// Accepting joins
    Open,
    /// At capacity, session in progress
    Active,
    /// Last player left; retained for history, never reopens
    Closed,
}

impl std::fmt::Display for LobbyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LobbyStatus::Open => write!(f, "open"),
            LobbyStatus::Active => write!(f, "active"),
            LobbyStatus::Closed => write!(f, "closed"),
        }
    }
}

/// A player's state within a lobby
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: UserId,
    /// Clamped to [0, 100] on every write
    pub sanity: f64,
    pub dead: bool,
    /// Inventory items carried into the session; set semantics, join order
    pub items: Vec<InventoryId>,
}

impl Player {
    /// Create a player with default state
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            sanity: 100.0,
            dead: false,
            items: Vec::new(),
        }
    }
}

/// Request to create a new lobby
///
/// Fields default to empty/zero so that absent keys surface as an
/// `InvalidArgument` rejection instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateLobbyRequest {
    pub host_user_id: UserId,
    pub map_id: MapId,
    pub difficulty: String,
    pub max_players: usize,
}

impl Default for CreateLobbyRequest {
    fn default() -> Self {
        Self {
            host_user_id: String::new(),
            map_id: String::new(),
            difficulty: String::new(),
            max_players: 0,
        }
    }
}

/// Request to join an existing lobby
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinLobbyRequest {
    pub user_id: UserId,
}

/// Request to leave a lobby
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveLobbyRequest {
    pub user_id: UserId,
}

/// Partial update to a player's state; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePlayerRequest {
    pub sanity: Option<f64>,
    pub dead: Option<bool>,
}

/// Request to bring an inventory item into the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BringItemRequest {
    pub user_id: UserId,
    pub inventory_id: InventoryId,
}

/// Minimal player reference returned by join responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self {
            user_id: player.user_id.clone(),
        }
    }
}

/// Player projection returned by lobby reads and player updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub sanity: f64,
    pub dead: bool,
}

impl From<&Player> for PlayerState {
    fn from(player: &Player) -> Self {
        Self {
            user_id: player.user_id.clone(),
            sanity: player.sanity,
            dead: player.dead,
        }
    }
}

/// Response body for lobby creation
///
/// Creation echoes the full player records (snake_case), unlike reads which
/// project the camelCase summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLobbyResponse {
    pub id: LobbyId,
    pub difficulty: String,
    #[serde(rename = "mapId")]
    pub map_id: MapId,
    pub players: Vec<Player>,
    pub status: LobbyStatus,
}

impl From<&Lobby> for CreateLobbyResponse {
    fn from(lobby: &Lobby) -> Self {
        Self {
            id: lobby.id.clone(),
            difficulty: lobby.difficulty.clone(),
            map_id: lobby.map_id.clone(),
            players: lobby.players.clone(),
            status: lobby.status,
        }
    }
}

/// Response body for a successful join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinLobbyResponse {
    pub id: LobbyId,
    pub players: Vec<PlayerRef>,
}

impl From<&Lobby> for JoinLobbyResponse {
    fn from(lobby: &Lobby) -> Self {
        Self {
            id: lobby.id.clone(),
            players: lobby.players.iter().map(PlayerRef::from).collect(),
        }
    }
}

/// Response body for a successful leave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveLobbyResponse {
    pub left: bool,
}

/// Response body for a successful item pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BringItemResponse {
    pub added: bool,
}

/// Response body for lobby reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyStateResponse {
    pub id: LobbyId,
    pub difficulty: String,
    #[serde(rename = "mapId")]
    pub map_id: MapId,
    pub players: Vec<PlayerState>,
    pub status: LobbyStatus,
}

impl From<&Lobby> for LobbyStateResponse {
    fn from(lobby: &Lobby) -> Self {
        Self {
            id: lobby.id.clone(),
            difficulty: lobby.difficulty.clone(),
            map_id: lobby.map_id.clone(),
            players: lobby.players.iter().map(PlayerState::from).collect(),
            status: lobby.status,
        }
    }
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
