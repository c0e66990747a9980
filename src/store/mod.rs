//! Lobby storage interface and implementations
//!
//! The store maps a lobby ID to its latest snapshot and offers a
//! revision-gated conditional write. A write either commits the whole
//! snapshot or leaves the stored value untouched; there is no partial
//! application, so an aborted request can only ever discard an uncommitted
//! computed snapshot.

pub mod memory;

pub use memory::InMemoryLobbyStore;

use crate::error::Result;
use crate::lobby::state::Lobby;
use async_trait::async_trait;

/// Outcome of a conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored revision matched and the snapshot was replaced
    Committed,
    /// Another writer committed first; the caller should reload and retry
    RevisionConflict,
}

/// Trait for lobby storage backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LobbyStore: Send + Sync {
    /// Insert a newly created lobby; fails with `AlreadyExists` on ID reuse
    async fn create(&self, lobby: Lobby) -> Result<()>;

    /// Fetch the latest snapshot; fails with `LobbyNotFound` if absent
    async fn get(&self, lobby_id: &str) -> Result<Lobby>;

    /// Replace the stored snapshot if its revision still equals
    /// `expected_revision`
    async fn compare_and_swap(&self, expected_revision: u64, lobby: Lobby) -> Result<CasOutcome>;

    /// Number of lobbies held; doubles as the health probe
    async fn count(&self) -> Result<usize>;
}
