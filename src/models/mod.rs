pub mod playlist;
pub mod profile;
pub mod track;

pub use playlist::{
    CreatePlaylistRequest, CreatePlaylistResponse, GeneratePlaylistRequest, PlaylistItem,
    PlaylistResponse, RefinePlaylistRequest,
};
pub use profile::{
    ArtistSummary, GenreCount, HomepageQuery, HomepageResponse, TasteProfile, TrackSummary,
};
pub use track::{
    Artist, CreatedPlaylist, NewPlaylist, SavedTracksPage, TimeRange, Track, UserProfile,
};
