use crate::error::Result;
use crate::models::{Artist, GenreCount, TasteProfile, TimeRange};
use crate::services::catalog::MusicCatalog;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

const TOP_ITEMS_LIMIT: u32 = 10;
const SAVED_TRACKS_PAGE_SIZE: u32 = 50;
const ARTIST_BATCH_SIZE: usize = 50;
const TOP_GENRES: usize = 15;

/// Builds the taste profile that seeds every generation prompt.
///
/// Calls are strictly sequential; the first upstream failure aborts the
/// whole aggregation and nothing partial is kept.
pub async fn build_taste_profile(catalog: &dyn MusicCatalog) -> Result<TasteProfile> {
    let top_artists = catalog
        .top_artists(TimeRange::MediumTerm, TOP_ITEMS_LIMIT)
        .await?;
    let top_tracks = catalog
        .top_tracks(TimeRange::MediumTerm, TOP_ITEMS_LIMIT)
        .await?;

    let saved_artist_ids = collect_saved_artist_ids(catalog).await?;

    let mut artists: Vec<Artist> = Vec::new();
    for batch in saved_artist_ids.chunks(ARTIST_BATCH_SIZE) {
        artists.extend(catalog.artists(batch).await?);
    }

    // Top artists count too, unless the saved library already covered them
    let seen: HashSet<&str> = artists.iter().filter_map(|a| a.id.as_deref()).collect();
    let extra: Vec<Artist> = top_artists
        .iter()
        .filter(|a| a.id.as_deref().map_or(true, |id| !seen.contains(id)))
        .cloned()
        .collect();
    artists.extend(extra);

    let genre_counts = count_genres(&artists, TOP_GENRES);

    info!(
        "Taste profile: {} top artists, {} top tracks, {} genres from {} artists",
        top_artists.len(),
        top_tracks.len(),
        genre_counts.len(),
        artists.len()
    );

    Ok(TasteProfile {
        top_artists: top_artists.into_iter().map(|a| a.name).collect(),
        top_tracks: top_tracks
            .iter()
            .map(|t| (t.name.clone(), t.primary_artist().to_string()))
            .collect(),
        genre_counts,
    })
}

/// Pages through saved tracks until the reported total is reached.
/// Returns distinct artist ids in first-seen order.
async fn collect_saved_artist_ids(catalog: &dyn MusicCatalog) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut offset = 0;

    loop {
        let page = catalog.saved_tracks(SAVED_TRACKS_PAGE_SIZE, offset).await?;
        let fetched = page.items.len() as u32;
        debug!("Saved tracks page at offset {}: {} of {}", offset, fetched, page.total);

        for track in page.items.into_iter().filter_map(|item| item.track) {
            for artist in track.artists {
                if let Some(id) = artist.id {
                    if seen.insert(id.clone()) {
                        ids.push(id);
                    }
                }
            }
        }

        offset += fetched;
        if fetched == 0 || offset >= page.total {
            break;
        }
    }

    Ok(ids)
}

/// Counts genre tags across artists, highest first, ties broken by name
pub fn count_genres(artists: &[Artist], limit: usize) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        *counts.entry(genre.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    sorted.truncate(limit);
    sorted
}
