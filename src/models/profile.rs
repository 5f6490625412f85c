use super::track::TimeRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Summary of a user's listening history, recomputed per request
#[derive(Debug, Clone, Default, Serialize)]
pub struct TasteProfile {
    pub top_artists: Vec<String>,
    /// (track name, primary artist name)
    pub top_tracks: Vec<(String, String)>,
    /// Sorted by count, highest first
    pub genre_counts: Vec<GenreCount>,
}

impl TasteProfile {
    /// "genre (count)" pairs joined for prompt text
    pub fn genre_summary(&self) -> String {
        self.genre_counts
            .iter()
            .map(|g| format!("{} ({})", g.genre, g.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageQuery {
    #[serde(default)]
    pub time_range: TimeRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageResponse {
    pub name: String,
    pub profile_picture: String,
    pub artists: Vec<ArtistSummary>,
    pub tracks: Vec<TrackSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct TrackSummary {
    pub name: String,
    pub artist: String,
    pub image: String,
}
