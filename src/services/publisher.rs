use crate::error::{AppError, Result};
use crate::models::{NewPlaylist, PlaylistItem};
use crate::services::catalog::MusicCatalog;
use tracing::{debug, info};

pub const PLAYLIST_DESCRIPTION: &str = "Generated by Playlist Generator";

/// Saves the items as a new private playlist and returns its web URL.
///
/// Items without both a track and an artist are dropped first; if nothing is
/// left no upstream call is made. Items with no catalog match are skipped,
/// so the saved playlist may be shorter than the input.
pub async fn publish_playlist(
    catalog: &dyn MusicCatalog,
    name: &str,
    items: &[PlaylistItem],
) -> Result<String> {
    let publishable: Vec<&PlaylistItem> = items.iter().filter(|i| i.is_publishable()).collect();
    if publishable.is_empty() {
        return Err(AppError::Validation("No valid tracks to add".to_string()));
    }

    let user = catalog.current_user().await?;
    let playlist = catalog
        .create_playlist(
            &user.id,
            &NewPlaylist {
                name: name.trim().to_string(),
                description: PLAYLIST_DESCRIPTION.to_string(),
                public: false,
            },
        )
        .await?;

    let mut uris = Vec::with_capacity(publishable.len());
    for item in &publishable {
        let found = catalog.search_tracks(&item.search_query(), 1).await?;
        match found.into_iter().next() {
            Some(track) if !track.uri.is_empty() => uris.push(track.uri),
            _ => debug!("No catalog match for {} by {}", item.track, item.artist),
        }
    }

    if !uris.is_empty() {
        catalog.add_tracks(&playlist.id, &uris).await?;
    }

    info!(
        "Published playlist {} with {} of {} tracks",
        playlist.id,
        uris.len(),
        items.len()
    );

    playlist.external_urls.spotify.ok_or_else(|| {
        AppError::Spotify(format!("Playlist {} has no public URL", playlist.id))
    })
}
