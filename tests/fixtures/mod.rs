//! Test fixtures and store doubles for integration testing

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use seance_lobby::config::AppConfig;
use seance_lobby::error::{LobbyError, Result};
use seance_lobby::lobby::Lobby;
use seance_lobby::service::{api_router, AppState};
use seance_lobby::store::{CasOutcome, InMemoryLobbyStore, LobbyStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

/// Router backed by a fresh in-memory store
pub fn test_router() -> Router {
    router_with_store(Arc::new(InMemoryLobbyStore::new()))
}

/// Router backed by an explicit store double
pub fn router_with_store(store: Arc<dyn LobbyStore>) -> Router {
    api_router(AppState::with_store(&AppConfig::default(), store))
}

/// Store double whose every operation fails, for health degradation tests
pub struct FailingStore;

#[async_trait]
impl LobbyStore for FailingStore {
    async fn create(&self, _lobby: Lobby) -> Result<()> {
        Err(unreachable_store())
    }

    async fn get(&self, _lobby_id: &str) -> Result<Lobby> {
        Err(unreachable_store())
    }

    async fn compare_and_swap(&self, _expected_revision: u64, _lobby: Lobby) -> Result<CasOutcome> {
        Err(unreachable_store())
    }

    async fn count(&self) -> Result<usize> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> LobbyError {
    LobbyError::Storage {
        message: "lobby store unreachable".to_string(),
    }
}

/// Store double whose conditional writes always lose, for contention tests
pub struct ContendedStore {
    inner: InMemoryLobbyStore,
}

impl ContendedStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryLobbyStore::new(),
        }
    }
}

#[async_trait]
impl LobbyStore for ContendedStore {
    async fn create(&self, lobby: Lobby) -> Result<()> {
        self.inner.create(lobby).await
    }

    async fn get(&self, lobby_id: &str) -> Result<Lobby> {
        self.inner.get(lobby_id).await
    }

    async fn compare_and_swap(&self, _expected_revision: u64, _lobby: Lobby) -> Result<CasOutcome> {
        Ok(CasOutcome::RevisionConflict)
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }
}

/// Send a JSON request and collect the response status and parsed body
pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

/// Send a bodyless GET request and collect the response
pub async fn send_get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
