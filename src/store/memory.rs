//! In-memory lobby store
//!
//! Snapshot storage behind a `RwLock`-guarded map. The lock is held only for
//! the duration of the map operation, never across an await point, so the
//! conditional write is atomic with respect to other writers on the same key.

use crate::error::{LobbyError, Result};
use crate::lobby::state::Lobby;
use crate::store::{CasOutcome, LobbyStore};
use crate::types::LobbyId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory lobby store implementation
#[derive(Debug, Default)]
pub struct InMemoryLobbyStore {
    lobbies: RwLock<HashMap<LobbyId, Lobby>>,
}

impl InMemoryLobbyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LobbyStore for InMemoryLobbyStore {
    async fn create(&self, lobby: Lobby) -> Result<()> {
        let mut lobbies = self.lobbies.write().map_err(|_| LobbyError::Storage {
            message: "Failed to acquire lobbies write lock".to_string(),
        })?;

        if lobbies.contains_key(&lobby.id) {
            return Err(LobbyError::AlreadyExists {
                lobby_id: lobby.id.clone(),
            });
        }

        lobbies.insert(lobby.id.clone(), lobby);
        Ok(())
    }

    async fn get(&self, lobby_id: &str) -> Result<Lobby> {
        let lobbies = self.lobbies.read().map_err(|_| LobbyError::Storage {
            message: "Failed to acquire lobbies read lock".to_string(),
        })?;

        lobbies
            .get(lobby_id)
            .cloned()
            .ok_or_else(|| LobbyError::LobbyNotFound {
                lobby_id: lobby_id.to_string(),
            })
    }

    async fn compare_and_swap(&self, expected_revision: u64, lobby: Lobby) -> Result<CasOutcome> {
        let mut lobbies = self.lobbies.write().map_err(|_| LobbyError::Storage {
            message: "Failed to acquire lobbies write lock".to_string(),
        })?;

        match lobbies.get_mut(&lobby.id) {
            None => Err(LobbyError::LobbyNotFound {
                lobby_id: lobby.id.clone(),
            }),
            Some(stored) if stored.revision == expected_revision => {
                *stored = lobby;
                Ok(CasOutcome::Committed)
            }
            Some(_) => Ok(CasOutcome::RevisionConflict),
        }
    }

    async fn count(&self) -> Result<usize> {
        let lobbies = self.lobbies.read().map_err(|_| LobbyError::Storage {
            message: "Failed to acquire lobbies read lock".to_string(),
        })?;

        Ok(lobbies.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_lobby() -> Lobby {
        Lobby::create("host", "map-1", "intermediate", 4).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let store = InMemoryLobbyStore::new();
        let lobby = create_test_lobby();

        store.create(lobby.clone()).await.unwrap();
        let fetched = store.get(&lobby.id).await.unwrap();
        assert_eq!(fetched, lobby);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let store = InMemoryLobbyStore::new();
        let lobby = create_test_lobby();

        store.create(lobby.clone()).await.unwrap();
        let err = store.create(lobby).await.unwrap_err();
        assert!(matches!(err, LobbyError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_get_unknown_lobby() {
        let store = InMemoryLobbyStore::new();
        let err = store.get("missing").await.unwrap_err();
        assert!(matches!(err, LobbyError::LobbyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_compare_and_swap_commits_on_matching_revision() {
        let store = InMemoryLobbyStore::new();
        let lobby = create_test_lobby();
        store.create(lobby.clone()).await.unwrap();

        let mut updated = lobby.clone();
        updated.join("u2").unwrap();

        let outcome = store
            .compare_and_swap(lobby.revision, updated.clone())
            .await
            .unwrap();
        assert_eq!(outcome, CasOutcome::Committed);
        assert_eq!(store.get(&lobby.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_compare_and_swap_detects_stale_revision() {
        let store = InMemoryLobbyStore::new();
        let lobby = create_test_lobby();
        store.create(lobby.clone()).await.unwrap();

        let mut first = lobby.clone();
        first.join("u2").unwrap();
        let mut second = lobby.clone();
        second.join("u3").unwrap();

        let outcome = store.compare_and_swap(lobby.revision, first).await.unwrap();
        assert_eq!(outcome, CasOutcome::Committed);

        // Second writer read the original revision and must lose
        let outcome = store
            .compare_and_swap(lobby.revision, second)
            .await
            .unwrap();
        assert_eq!(outcome, CasOutcome::RevisionConflict);

        let stored = store.get(&lobby.id).await.unwrap();
        assert!(stored.player("u2").is_some());
        assert!(stored.player("u3").is_none());
    }

    #[tokio::test]
    async fn test_compare_and_swap_unknown_lobby() {
        let store = InMemoryLobbyStore::new();
        let lobby = create_test_lobby();

        let err = store.compare_and_swap(0, lobby).await.unwrap_err();
        assert!(matches!(err, LobbyError::LobbyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_tracks_inserts() {
        let store = InMemoryLobbyStore::new();
        assert_eq!(store.count().await.unwrap(), 0);

        store.create(create_test_lobby()).await.unwrap();
        store.create(create_test_lobby()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
