//! Application state and HTTP server lifecycle
//!
//! `AppState` wires the store and lobby service together for the request
//! handlers; `ApiServer` owns the listener and a broadcast shutdown channel
//! so the binary can stop it gracefully on SIGINT/SIGTERM.

use crate::config::AppConfig;
use crate::lobby::LobbyService;
use crate::service::routes::api_router;
use crate::store::{InMemoryLobbyStore, LobbyStore};
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Shared state for the lobby API handlers
#[derive(Clone)]
pub struct AppState {
    pub lobby_service: Arc<LobbyService>,
    pub store: Arc<dyn LobbyStore>,
    pub service_name: String,
}

impl AppState {
    /// Create application state backed by the in-memory store
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryLobbyStore::new()))
    }

    /// Create application state on top of an explicit store backend
    pub fn with_store(config: &AppConfig, store: Arc<dyn LobbyStore>) -> Self {
        let lobby_service = Arc::new(LobbyService::with_retry_bound(
            store.clone(),
            config.lobby.max_swap_retries,
        ));

        Self {
            lobby_service,
            store,
            service_name: config.service.name.clone(),
        }
    }
}

/// HTTP server exposing the lobby REST API
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new server from configuration
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(&config);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Shared handler state (for tests and diagnostics)
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        api_router(self.state.clone())
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_addr()
            .parse()
            .context("Invalid HTTP bind address")?;

        let listener = TcpListener::bind(addr).await?;
        info!("Lobby service listening on http://{}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Signal the server to stop accepting requests and drain
    pub fn stop(&self) {
        if self.shutdown_tx.send(()).is_err() {
            warn!("API server shutdown signal had no receiver");
        }
    }
}
