use crate::models::PlaylistItem;
use crate::services::catalog::MusicCatalog;
use futures::future::join_all;
use tracing::warn;

struct Enrichment {
    image: Option<String>,
    spotify_url: Option<String>,
}

/// Attaches cover art and a Spotify link to every item.
///
/// All searches run concurrently. A failed or empty search leaves that item
/// unenriched; it never affects the other items and never fails the call.
pub async fn enrich_playlist(
    catalog: &dyn MusicCatalog,
    items: Vec<PlaylistItem>,
) -> Vec<PlaylistItem> {
    let lookups = items.iter().map(|item| lookup(catalog, item));
    let results = join_all(lookups).await;

    items
        .into_iter()
        .zip(results)
        .map(|(mut item, found)| {
            if let Some(found) = found {
                item.image = found.image;
                item.spotify_url = found.spotify_url;
            }
            item
        })
        .collect()
}

async fn lookup(catalog: &dyn MusicCatalog, item: &PlaylistItem) -> Option<Enrichment> {
    let query = item.search_query();
    if query.is_empty() {
        return None;
    }

    match catalog.search_tracks(&query, 1).await {
        Ok(tracks) => tracks.into_iter().next().map(|track| Enrichment {
            image: track.image_url().map(str::to_string),
            spotify_url: track.external_urls.spotify,
        }),
        Err(e) => {
            warn!("Search failed for \"{}\": {}", query, e);
            None
        }
    }
}
