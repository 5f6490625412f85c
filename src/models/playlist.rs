use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// A single suggested song. The model only fills `track` and `artist`;
/// `image` and `spotify_url` are attached by catalog enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub track: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub artist: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

/// Null or non-string values read as empty, so the item is filtered later
/// instead of failing the whole request.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string())
}

impl PlaylistItem {
    pub fn new(track: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            artist: artist.into(),
            image: None,
            spotify_url: None,
        }
    }

    /// Both fields must be non-blank before an item may be published
    pub fn is_publishable(&self) -> bool {
        !self.track.trim().is_empty() && !self.artist.trim().is_empty()
    }

    pub fn search_query(&self) -> String {
        format!("{} {}", self.track.trim(), self.artist.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePlaylistRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "No prompt provided"))]
    pub prompt: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefinePlaylistRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "No prompt provided"))]
    pub prompt: String,
    pub playlist: Option<Vec<PlaylistItem>>,
    #[serde(default)]
    pub original_prompt: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Playlist name is required"))]
    pub name: String,
    pub tracks: Option<Vec<PlaylistItem>>,
}

/// Returned by generate and refine: the raw model text for clients that
/// parse it themselves, plus the normalized and enriched items.
#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub playlist: String,
    pub tracks: Vec<PlaylistItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistResponse {
    pub success: bool,
    pub playlist_url: String,
}
