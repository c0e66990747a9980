//! Lobby service orchestrating storage and state transitions
//!
//! Every mutation runs a read-apply-swap cycle: load the current snapshot,
//! apply the pure state transition, then attempt a conditional write gated on
//! the revision that was read. A concurrent writer makes the swap fail, in
//! which case the whole cycle retries against the fresh snapshot up to a
//! bounded number of attempts. No lock is held across the store round trip.

use crate::error::{LobbyError, Result};
use crate::lobby::state::Lobby;
use crate::store::{CasOutcome, LobbyStore};
use crate::types::Player;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Default bound on conditional-write retries per request
pub const DEFAULT_MAX_SWAP_RETRIES: u32 = 5;

/// Counters describing service activity since startup
#[derive(Debug, Clone, Default)]
pub struct LobbyServiceStats {
    /// Total lobbies created
    pub lobbies_created: u64,
    /// Total mutations committed (joins, leaves, updates, pickups)
    pub operations_applied: u64,
    /// Conditional writes that lost to a concurrent writer and retried
    pub swap_conflicts: u64,
    /// Requests that exhausted their retry bound
    pub swap_retries_exhausted: u64,
}

/// The main lobby service
pub struct LobbyService {
    store: Arc<dyn LobbyStore>,
    max_swap_retries: u32,
    stats: RwLock<LobbyServiceStats>,
}

impl LobbyService {
    /// Create a service with the default retry bound
    pub fn new(store: Arc<dyn LobbyStore>) -> Self {
        Self::with_retry_bound(store, DEFAULT_MAX_SWAP_RETRIES)
    }

    /// Create a service with an explicit retry bound
    pub fn with_retry_bound(store: Arc<dyn LobbyStore>, max_swap_retries: u32) -> Self {
        Self {
            store,
            max_swap_retries: max_swap_retries.max(1),
            stats: RwLock::new(LobbyServiceStats::default()),
        }
    }

    /// Create a new lobby with the host as its sole player
    pub async fn create_lobby(
        &self,
        host_user_id: &str,
        map_id: &str,
        difficulty: &str,
        max_players: usize,
    ) -> Result<Lobby> {
        let lobby = Lobby::create(host_user_id, map_id, difficulty, max_players)?;
        self.store.create(lobby.clone()).await?;

        info!(
            "Created lobby {} - host: '{}', map: '{}', difficulty: '{}', capacity: {}",
            lobby.id, host_user_id, map_id, difficulty, max_players
        );
        self.record(|stats| stats.lobbies_created += 1);

        Ok(lobby)
    }

    /// Add a user to a lobby's roster
    pub async fn join(&self, lobby_id: &str, user_id: &str) -> Result<Lobby> {
        let lobby = self.apply(lobby_id, |lobby| lobby.join(user_id)).await?;
        info!(
            "Player '{}' joined lobby {} ({}/{} players, status: {})",
            user_id,
            lobby_id,
            lobby.players.len(),
            lobby.max_players,
            lobby.status
        );
        Ok(lobby)
    }

    /// Remove a user from a lobby's roster
    pub async fn leave(&self, lobby_id: &str, user_id: &str) -> Result<Lobby> {
        let lobby = self.apply(lobby_id, |lobby| lobby.leave(user_id)).await?;
        info!(
            "Player '{}' left lobby {} ({} players remain, status: {})",
            user_id,
            lobby_id,
            lobby.players.len(),
            lobby.status
        );
        Ok(lobby)
    }

    /// Apply a partial state update to one player
    pub async fn update_player(
        &self,
        lobby_id: &str,
        user_id: &str,
        sanity: Option<f64>,
        dead: Option<bool>,
    ) -> Result<Player> {
        let lobby = self
            .apply(lobby_id, |lobby| {
                lobby.update_player(user_id, sanity, dead).map(|_| ())
            })
            .await?;

        lobby
            .player(user_id)
            .cloned()
            .ok_or_else(|| LobbyError::PlayerNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Record an inventory item carried by a player
    pub async fn bring_item(
        &self,
        lobby_id: &str,
        user_id: &str,
        inventory_id: &str,
    ) -> Result<Lobby> {
        self.apply(lobby_id, |lobby| lobby.bring_item(user_id, inventory_id))
            .await
    }

    /// Fetch the latest snapshot without revision negotiation
    pub async fn get_lobby(&self, lobby_id: &str) -> Result<Lobby> {
        self.store.get(lobby_id).await
    }

    /// Snapshot of the service counters
    pub fn stats(&self) -> LobbyServiceStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Run one mutation through the read-apply-swap cycle
    ///
    /// Business-rule rejections from the state machine abort immediately;
    /// only a revision conflict triggers a retry, because only then is the
    /// decision potentially stale.
    async fn apply<F>(&self, lobby_id: &str, operation: F) -> Result<Lobby>
    where
        F: Fn(&mut Lobby) -> Result<()>,
    {
        for attempt in 1..=self.max_swap_retries {
            let mut lobby = self.store.get(lobby_id).await?;
            let expected_revision = lobby.revision;

            operation(&mut lobby)?;

            match self
                .store
                .compare_and_swap(expected_revision, lobby.clone())
                .await?
            {
                CasOutcome::Committed => {
                    self.record(|stats| stats.operations_applied += 1);
                    return Ok(lobby);
                }
                CasOutcome::RevisionConflict => {
                    self.record(|stats| stats.swap_conflicts += 1);
                    debug!(
                        "Lobby {} changed underneath (attempt {}/{}), retrying",
                        lobby_id, attempt, self.max_swap_retries
                    );
                }
            }
        }

        self.record(|stats| stats.swap_retries_exhausted += 1);
        warn!(
            "Exhausted {} swap attempts for lobby {}",
            self.max_swap_retries, lobby_id
        );
        Err(LobbyError::Contention {
            lobby_id: lobby_id.to_string(),
        })
    }

    fn record<F>(&self, update: F)
    where
        F: FnOnce(&mut LobbyServiceStats),
    {
        if let Ok(mut stats) = self.stats.write() {
            update(&mut stats);
        }
    }
}
