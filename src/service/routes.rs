//! REST handlers for the lobby API
//!
//! Each mutating handler parses its request structure once at the boundary,
//! delegates to the lobby service, and shapes the response as a pure
//! projection of the resulting snapshot. Error responses all share the
//! `{error: ...}` body with the status drawn from the error taxonomy.

use crate::error::LobbyError;
use crate::service::app::AppState;
use crate::service::health::{health_handler, stats_handler};
use crate::types::{
    BringItemRequest, BringItemResponse, CreateLobbyRequest, CreateLobbyResponse, ErrorBody,
    JoinLobbyRequest, JoinLobbyResponse, LeaveLobbyRequest, LeaveLobbyResponse, LobbyStateResponse,
    PlayerState, UpdatePlayerRequest,
};
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

/// JSON extractor that reports malformed bodies through the error taxonomy
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(LobbyError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for LobbyError {
    fn from(rejection: JsonRejection) -> Self {
        LobbyError::InvalidArgument {
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for LobbyError {
    fn into_response(self) -> Response {
        let status = match &self {
            LobbyError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            LobbyError::LobbyNotFound { .. } | LobbyError::PlayerNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            LobbyError::NotMember { .. }
            | LobbyError::AlreadyMember { .. }
            | LobbyError::LobbyFull { .. }
            | LobbyError::NotOpen { .. }
            | LobbyError::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
            LobbyError::Contention { .. } => StatusCode::SERVICE_UNAVAILABLE,
            LobbyError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Create the Axum router with all lobby endpoints
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/lobbies", post(create_lobby))
        .route("/lobbies/{id}", get(get_lobby))
        .route("/lobbies/{id}/join", post(join_lobby))
        .route("/lobbies/{id}/leave", post(leave_lobby))
        .route("/lobbies/{id}/players/{user_id}", patch(update_player))
        .route("/lobbies/{id}/items/bring", post(bring_item))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `POST /lobbies` - create a new lobby with the host as sole player
async fn create_lobby(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateLobbyRequest>,
) -> Result<(StatusCode, Json<CreateLobbyResponse>), LobbyError> {
    let lobby = state
        .lobby_service
        .create_lobby(
            &request.host_user_id,
            &request.map_id,
            &request.difficulty,
            request.max_players,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateLobbyResponse::from(&lobby))))
}

/// `GET /lobbies/{id}` - current lobby state
async fn get_lobby(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
) -> Result<Json<LobbyStateResponse>, LobbyError> {
    let lobby = state.lobby_service.get_lobby(&lobby_id).await?;
    Ok(Json(LobbyStateResponse::from(&lobby)))
}

/// `POST /lobbies/{id}/join` - add a user to the roster
async fn join_lobby(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
    AppJson(request): AppJson<JoinLobbyRequest>,
) -> Result<Json<JoinLobbyResponse>, LobbyError> {
    let lobby = state.lobby_service.join(&lobby_id, &request.user_id).await?;
    Ok(Json(JoinLobbyResponse::from(&lobby)))
}

/// `POST /lobbies/{id}/leave` - remove a user from the roster
async fn leave_lobby(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
    AppJson(request): AppJson<LeaveLobbyRequest>,
) -> Result<Json<LeaveLobbyResponse>, LobbyError> {
    state
        .lobby_service
        .leave(&lobby_id, &request.user_id)
        .await?;
    Ok(Json(LeaveLobbyResponse { left: true }))
}

/// `PATCH /lobbies/{id}/players/{user_id}` - partial player state update
async fn update_player(
    State(state): State<AppState>,
    Path((lobby_id, user_id)): Path<(String, String)>,
    AppJson(request): AppJson<UpdatePlayerRequest>,
) -> Result<Json<PlayerState>, LobbyError> {
    let player = state
        .lobby_service
        .update_player(&lobby_id, &user_id, request.sanity, request.dead)
        .await?;
    Ok(Json(PlayerState::from(&player)))
}

/// `POST /lobbies/{id}/items/bring` - record an item carried into the session
async fn bring_item(
    State(state): State<AppState>,
    Path(lobby_id): Path<String>,
    AppJson(request): AppJson<BringItemRequest>,
) -> Result<Json<BringItemResponse>, LobbyError> {
    state
        .lobby_service
        .bring_item(&lobby_id, &request.user_id, &request.inventory_id)
        .await?;
    Ok(Json(BringItemResponse { added: true }))
}
