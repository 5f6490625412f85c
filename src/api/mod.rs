pub mod auth;
pub mod middleware;
pub mod playlists;
pub mod profile;

pub use auth::auth_routes;
pub use playlists::playlist_routes;
pub use profile::profile_routes;

use crate::services::{AuthService, PlaylistGenerator};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub generator: Arc<PlaylistGenerator>,
    /// Browser destination after login/logout, without trailing slash
    pub frontend_url: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(health))
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(playlist_routes())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "API is working!" }))
}
