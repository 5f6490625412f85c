use crate::api::middleware::RequireSession;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{ArtistSummary, HomepageQuery, HomepageResponse, TrackSummary};
use axum::{
    extract::Query,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

const HOMEPAGE_ITEMS: u32 = 20;

pub fn profile_routes() -> Router<Arc<AppState>> {
    Router::new().route("/homepage", get(homepage))
}

/// Profile, top artists and top tracks for the landing page
async fn homepage(
    RequireSession(session): RequireSession,
    Query(query): Query<HomepageQuery>,
) -> Result<Json<HomepageResponse>> {
    let catalog = session.catalog.as_ref();

    let user = catalog.current_user().await?;
    let artists = catalog.top_artists(query.time_range, HOMEPAGE_ITEMS).await?;
    let tracks = catalog.top_tracks(query.time_range, HOMEPAGE_ITEMS).await?;

    Ok(Json(HomepageResponse {
        name: user.display_name.unwrap_or_default(),
        profile_picture: user
            .images
            .first()
            .and_then(|i| i.url.clone())
            .unwrap_or_default(),
        artists: artists
            .iter()
            .map(|a| ArtistSummary {
                name: a.name.clone(),
                image: a.image_url().unwrap_or_default().to_string(),
            })
            .collect(),
        tracks: tracks
            .iter()
            .map(|t| TrackSummary {
                name: t.name.clone(),
                artist: t.primary_artist().to_string(),
                image: t.image_url().unwrap_or_default().to_string(),
            })
            .collect(),
    }))
}
