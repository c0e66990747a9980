//! Lobby snapshot and state transitions
//!
//! This module contains the pure lobby logic: applying an operation to a
//! snapshot either yields the mutated snapshot or a typed rejection, with no
//! I/O involved. The API layer persists the result through a conditional
//! write, so every successful operation bumps the revision counter by
//! exactly one.

use crate::error::{LobbyError, Result};
use crate::types::{LobbyId, LobbyStatus, MapId, Player, UserId};
use crate::utils::{clamp_sanity, current_timestamp, generate_lobby_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full state of a lobby at a point in time
///
/// The player list preserves insertion order; the head of the list is always
/// the longest-tenured member, which drives deterministic host handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lobby {
    pub id: LobbyId,
    pub host_user_id: UserId,
    pub map_id: MapId,
    pub difficulty: String,
    pub max_players: usize,
    pub players: Vec<Player>,
    pub status: LobbyStatus,
    pub created_at: DateTime<Utc>,
    /// Bumped on every successful mutation; gates conditional writes.
    /// Never exposed on the wire.
    pub revision: u64,
}

impl Lobby {
    /// Create a new lobby with the host as its sole player
    ///
    /// A single-seat lobby is born at capacity and therefore starts `active`.
    pub fn create(
        host_user_id: &str,
        map_id: &str,
        difficulty: &str,
        max_players: usize,
    ) -> Result<Self> {
        if host_user_id.is_empty() || map_id.is_empty() || difficulty.is_empty() || max_players == 0
        {
            return Err(LobbyError::missing_fields());
        }

        let status = if max_players == 1 {
            LobbyStatus::Active
        } else {
            LobbyStatus::Open
        };

        Ok(Self {
            id: generate_lobby_id(),
            host_user_id: host_user_id.to_string(),
            map_id: map_id.to_string(),
            difficulty: difficulty.to_string(),
            max_players,
            players: vec![Player::new(host_user_id)],
            status,
            created_at: current_timestamp(),
            revision: 0,
        })
    }

    /// Look up a player by user ID
    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    fn player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    /// Check if the lobby is at capacity
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// Add a user to the roster
    pub fn join(&mut self, user_id: &str) -> Result<()> {
        if user_id.is_empty() {
            return Err(LobbyError::missing_fields());
        }
        if self.player(user_id).is_some() {
            return Err(LobbyError::AlreadyMember {
                user_id: user_id.to_string(),
            });
        }
        if self.is_full() {
            return Err(LobbyError::LobbyFull {
                lobby_id: self.id.clone(),
            });
        }
        if self.status != LobbyStatus::Open {
            return Err(LobbyError::NotOpen {
                lobby_id: self.id.clone(),
            });
        }

        self.players.push(Player::new(user_id));
        if self.is_full() {
            self.status = LobbyStatus::Active;
        }

        self.bump_revision();
        Ok(())
    }

    /// Remove a user from the roster
    ///
    /// An emptied lobby closes for good; an active lobby dropping below
    /// capacity reopens. A departing host hands off to the remaining player
    /// who joined earliest, independent of request arrival order.
    pub fn leave(&mut self, user_id: &str) -> Result<()> {
        if user_id.is_empty() {
            return Err(LobbyError::missing_fields());
        }
        if self.player(user_id).is_none() {
            return Err(LobbyError::NotMember {
                user_id: user_id.to_string(),
            });
        }

        self.players.retain(|p| p.user_id != user_id);

        if self.players.is_empty() {
            self.status = LobbyStatus::Closed;
        } else if self.status == LobbyStatus::Active && self.players.len() < self.max_players {
            self.status = LobbyStatus::Open;
        }

        if self.host_user_id == user_id {
            if let Some(successor) = self.players.first() {
                self.host_user_id = successor.user_id.clone();
            }
        }

        self.bump_revision();
        Ok(())
    }

    /// Apply a partial update to a player's state
    ///
    /// Sanity is clamped to [0, 100] rather than rejected; absent fields are
    /// left untouched. Returns the player's state after the update.
    pub fn update_player(
        &mut self,
        user_id: &str,
        sanity: Option<f64>,
        dead: Option<bool>,
    ) -> Result<Player> {
        let player = self
            .player_mut(user_id)
            .ok_or_else(|| LobbyError::PlayerNotFound {
                user_id: user_id.to_string(),
            })?;

        if let Some(value) = sanity {
            player.sanity = clamp_sanity(value);
        }
        if let Some(value) = dead {
            player.dead = value;
        }
        let updated = player.clone();

        self.bump_revision();
        Ok(updated)
    }

    /// Record an inventory item carried by a player
    ///
    /// Re-adding an item a player already carries is a successful no-op.
    pub fn bring_item(&mut self, user_id: &str, inventory_id: &str) -> Result<()> {
        if inventory_id.is_empty() {
            return Err(LobbyError::missing_fields());
        }
        let player = self
            .player_mut(user_id)
            .ok_or_else(|| LobbyError::PlayerNotFound {
                user_id: user_id.to_string(),
            })?;

        if !player.items.iter().any(|item| item == inventory_id) {
            player.items.push(inventory_id.to_string());
        }

        self.bump_revision();
        Ok(())
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
    }
}
