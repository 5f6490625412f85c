use crate::error::Result;
use crate::models::{
    Artist, CreatedPlaylist, NewPlaylist, SavedTracksPage, TimeRange, Track, UserProfile,
};
use async_trait::async_trait;

/// User-scoped access to the music service.
///
/// Every call is made on behalf of the logged-in user whose session owns the
/// handle. The Spotify implementation lives in `services::spotify`.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn current_user(&self) -> Result<UserProfile>;

    async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Artist>>;

    async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>>;

    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<SavedTracksPage>;

    /// Full artist objects (with genres). Callers pass at most 50 ids.
    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>>;

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    async fn create_playlist(&self, user_id: &str, playlist: &NewPlaylist)
        -> Result<CreatedPlaylist>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}
