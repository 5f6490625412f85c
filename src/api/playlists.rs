use crate::api::middleware::{ApiJson, RequireSession};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{
    CreatePlaylistRequest, CreatePlaylistResponse, GeneratePlaylistRequest, PlaylistResponse,
    RefinePlaylistRequest,
};
use crate::services::{enricher, publisher, taste};
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use validator::Validate;

pub fn playlist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-playlist", post(generate_playlist))
        .route("/refine-playlist", post(refine_playlist))
        .route("/create-playlist", post(create_playlist))
}

fn require_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(AppError::Validation("No prompt provided".to_string()));
    }
    Ok(())
}

async fn generate_playlist(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    ApiJson(req): ApiJson<GeneratePlaylistRequest>,
) -> Result<Json<PlaylistResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_prompt(&req.prompt)?;

    let catalog = session.catalog.as_ref();
    let taste = taste::build_taste_profile(catalog).await?;
    let generated = state.generator.generate(&taste, &req.prompt).await?;
    let tracks = enricher::enrich_playlist(catalog, generated.items).await;

    Ok(Json(PlaylistResponse {
        playlist: generated.raw,
        tracks,
    }))
}

async fn refine_playlist(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    ApiJson(req): ApiJson<RefinePlaylistRequest>,
) -> Result<Json<PlaylistResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_prompt(&req.prompt)?;

    let current = req
        .playlist
        .ok_or_else(|| AppError::Validation("No playlist provided".to_string()))?;

    let catalog = session.catalog.as_ref();
    let taste = taste::build_taste_profile(catalog).await?;
    let refined = state
        .generator
        .refine(&taste, &req.prompt, &current, req.original_prompt.as_deref())
        .await?;
    let tracks = enricher::enrich_playlist(catalog, refined.items).await;

    Ok(Json(PlaylistResponse {
        playlist: refined.raw,
        tracks,
    }))
}

async fn create_playlist(
    RequireSession(session): RequireSession,
    ApiJson(req): ApiJson<CreatePlaylistRequest>,
) -> Result<Json<CreatePlaylistResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Playlist name is required".to_string()));
    }

    let tracks = req
        .tracks
        .ok_or_else(|| AppError::Validation("Invalid request body".to_string()))?;

    let playlist_url =
        publisher::publish_playlist(session.catalog.as_ref(), &req.name, &tracks).await?;

    Ok(Json(CreatePlaylistResponse {
        success: true,
        playlist_url,
    }))
}
