//! HTTP surface of the lobby service: router, handlers, and server lifecycle

pub mod app;
pub mod health;
pub mod routes;

pub use app::{ApiServer, AppState};
pub use routes::api_router;
