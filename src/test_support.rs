//! In-memory stand-ins for the upstream APIs, shared by unit tests.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::track::{Album, ExternalUrls, Image, SavedTrack};
use crate::models::{
    Artist, CreatedPlaylist, NewPlaylist, SavedTracksPage, TimeRange, Track, UserProfile,
};
use crate::services::catalog::MusicCatalog;
use crate::services::openai::{ChatMessage, LanguageModel};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub fn test_config() -> Config {
    Config {
        spotify_client_id: "client-id".to_string(),
        spotify_client_secret: "client-secret".to_string(),
        spotify_redirect_uri: "http://localhost:5000/callback".to_string(),
        spotify_accounts_url: "https://accounts.spotify.com".to_string(),
        spotify_api_url: "https://api.spotify.com/v1".to_string(),
        openai_api_key: "openai-key".to_string(),
        openai_api_url: "https://api.openai.com/v1".to_string(),
        openai_model: "gpt-3.5-turbo".to_string(),
        openai_max_tokens: 1024,
        openai_temperature: 0.8,
        frontend_url: "http://localhost:5173".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub fn artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: Some(id.to_string()),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: vec![Image {
            url: Some(format!("https://i.scdn.co/image/artist-{}", id)),
        }],
    }
}

/// A catalog track whose image and URL are derived from its name
pub fn catalog_track(name: &str, artist_name: &str, uri: &str) -> Track {
    Track {
        id: Some(name.to_string()),
        name: name.to_string(),
        uri: uri.to_string(),
        artists: vec![Artist {
            name: artist_name.to_string(),
            ..Default::default()
        }],
        album: Album {
            name: format!("{} LP", name),
            images: vec![Image {
                url: Some(format!("https://i.scdn.co/image/{}", name)),
            }],
        },
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", name)),
        },
    }
}

pub fn saved_track(name: &str, artist_id: &str) -> SavedTrack {
    let mut track = catalog_track(name, artist_id, &format!("spotify:track:{}", name));
    track.artists[0].id = Some(artist_id.to_string());
    SavedTrack { track: Some(track) }
}

#[derive(Default)]
struct CatalogCalls {
    saved_offsets: Vec<u32>,
    artist_batches: Vec<usize>,
    searches: Vec<String>,
    created: Vec<NewPlaylist>,
    added: Vec<(String, Vec<String>)>,
}

#[derive(Default)]
pub struct MockCatalog {
    top_artists: Vec<Artist>,
    top_tracks: Vec<Track>,
    saved: Vec<SavedTrack>,
    artists: HashMap<String, Artist>,
    search_results: HashMap<String, Track>,
    failing_searches: HashSet<String>,
    fail_saved_tracks: bool,
    calls: Mutex<CatalogCalls>,
}

impl MockCatalog {
    pub fn with_top_artists(mut self, artists: Vec<Artist>) -> Self {
        self.top_artists = artists;
        self
    }

    pub fn with_top_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.top_tracks = tracks;
        self
    }

    pub fn with_saved_tracks(mut self, saved: Vec<SavedTrack>) -> Self {
        self.saved = saved;
        self
    }

    pub fn with_artists(mut self, artists: impl IntoIterator<Item = Artist>) -> Self {
        for artist in artists {
            if let Some(id) = artist.id.clone() {
                self.artists.insert(id, artist);
            }
        }
        self
    }

    pub fn with_search_result(mut self, query: &str, track: Track) -> Self {
        self.search_results.insert(query.to_string(), track);
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    pub fn failing_saved_tracks(mut self) -> Self {
        self.fail_saved_tracks = true;
        self
    }

    pub fn saved_track_requests(&self) -> Vec<u32> {
        self.calls.lock().unwrap().saved_offsets.clone()
    }

    pub fn artist_batch_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().artist_batches.clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls.lock().unwrap().searches.clone()
    }

    pub fn created(&self) -> Vec<NewPlaylist> {
        self.calls.lock().unwrap().created.clone()
    }

    pub fn added(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().added.clone()
    }
}

#[async_trait]
impl MusicCatalog for MockCatalog {
    async fn current_user(&self) -> Result<UserProfile> {
        Ok(UserProfile {
            id: "user-1".to_string(),
            display_name: Some("Test User".to_string()),
            images: vec![Image {
                url: Some("https://i.scdn.co/image/me".to_string()),
            }],
        })
    }

    async fn top_artists(&self, _time_range: TimeRange, limit: u32) -> Result<Vec<Artist>> {
        Ok(self.top_artists.iter().take(limit as usize).cloned().collect())
    }

    async fn top_tracks(&self, _time_range: TimeRange, limit: u32) -> Result<Vec<Track>> {
        Ok(self.top_tracks.iter().take(limit as usize).cloned().collect())
    }

    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<SavedTracksPage> {
        self.calls.lock().unwrap().saved_offsets.push(offset);
        if self.fail_saved_tracks {
            return Err(AppError::Spotify("saved tracks unavailable".to_string()));
        }

        let items = self
            .saved
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(SavedTracksPage {
            items,
            total: self.saved.len() as u32,
        })
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>> {
        self.calls.lock().unwrap().artist_batches.push(ids.len());
        Ok(ids.iter().filter_map(|id| self.artists.get(id).cloned()).collect())
    }

    async fn search_tracks(&self, query: &str, _limit: u32) -> Result<Vec<Track>> {
        self.calls.lock().unwrap().searches.push(query.to_string());
        if self.failing_searches.contains(query) {
            return Err(AppError::Spotify(format!("search failed for {}", query)));
        }
        Ok(self.search_results.get(query).cloned().into_iter().collect())
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<CreatedPlaylist> {
        self.calls.lock().unwrap().created.push(playlist.clone());
        Ok(CreatedPlaylist {
            id: "pl1".to_string(),
            external_urls: ExternalUrls {
                spotify: Some("https://open.spotify.com/playlist/pl1".to_string()),
            },
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .added
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }
}

/// Replies with fixed text (or fails) and records every request
pub struct MockModel {
    reply: Option<String>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.requests.lock().unwrap().push(messages);
        self.reply
            .clone()
            .ok_or_else(|| AppError::OpenAi("model unavailable".to_string()))
    }
}
