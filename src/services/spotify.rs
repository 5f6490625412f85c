use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Artist, CreatedPlaylist, NewPlaylist, SavedTracksPage, TimeRange, Track, UserProfile,
};
use crate::services::catalog::MusicCatalog;
use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};

/// Permissions requested at login
pub const SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "playlist-read-private",
    "user-top-read",
    "user-library-read",
    "playlist-modify-public",
    "playlist-modify-private",
];

/// Spotify accepts at most this many URIs per "add items" request
const MAX_URIS_PER_REQUEST: usize = 100;

/// Application-level Spotify client: OAuth authorize URL and code exchange.
/// User calls go through the [`SpotifyUserApi`] handed out by [`SpotifyClient::user_api`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    accounts_url: String,
    api_url: String,
    client: Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ArtistsResponse {
    #[serde(default)]
    artists: Vec<Option<Artist>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Paging<Track>,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
            accounts_url: config.spotify_accounts_url.trim_end_matches('/').to_string(),
            api_url: config.spotify_api_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// URL the browser is redirected to at login. `show_dialog` forces the
    /// consent screen so users can switch accounts.
    pub fn authorize_url(&self, state: &str) -> Result<String> {
        let scope = SCOPES.join(" ");
        let url = Url::parse_with_params(
            &format!("{}/authorize", self.accounts_url),
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
                ("show_dialog", "true"),
            ],
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Spotify accounts URL: {}", e)))?;

        Ok(url.to_string())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        let auth = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret).as_bytes());

        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .header("Authorization", format!("Basic {}", auth))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Authentication(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| AppError::Authentication(format!("Failed to parse token response: {}", e)))
    }

    pub fn user_api(&self, access_token: &str) -> SpotifyUserApi {
        SpotifyUserApi {
            api_url: self.api_url.clone(),
            access_token: access_token.to_string(),
            client: self.client.clone(),
        }
    }
}

/// Spotify Web API calls authorized with one user's access token
#[derive(Debug, Clone)]
pub struct SpotifyUserApi {
    api_url: String,
    access_token: String,
    client: Client,
}

impl SpotifyUserApi {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Spotify(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Spotify(format!(
                "{} returned status: {} - {}",
                what, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Spotify(format!("Failed to parse {} response: {}", what, e)))
    }
}

#[async_trait]
impl MusicCatalog for SpotifyUserApi {
    async fn current_user(&self) -> Result<UserProfile> {
        self.send(self.client.get(self.url("/me")), "profile").await
    }

    async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Artist>> {
        let request = self.client.get(self.url("/me/top/artists")).query(&[
            ("time_range", time_range.as_str().to_string()),
            ("limit", limit.to_string()),
        ]);
        let page: Paging<Artist> = self.send(request, "top artists").await?;
        Ok(page.items)
    }

    async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Vec<Track>> {
        let request = self.client.get(self.url("/me/top/tracks")).query(&[
            ("time_range", time_range.as_str().to_string()),
            ("limit", limit.to_string()),
        ]);
        let page: Paging<Track> = self.send(request, "top tracks").await?;
        Ok(page.items)
    }

    async fn saved_tracks(&self, limit: u32, offset: u32) -> Result<SavedTracksPage> {
        let request = self
            .client
            .get(self.url("/me/tracks"))
            .query(&[("limit", limit), ("offset", offset)]);
        self.send(request, "saved tracks").await
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let request = self
            .client
            .get(self.url("/artists"))
            .query(&[("ids", ids.join(","))]);
        let response: ArtistsResponse = self.send(request, "artists").await?;
        Ok(response.artists.into_iter().flatten().collect())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        tracing::debug!("Searching Spotify for: {}", query);

        let request = self.client.get(self.url("/search")).query(&[
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
        ]);
        let response: SearchResponse = self.send(request, "search").await?;
        Ok(response.tracks.items)
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<CreatedPlaylist> {
        let request = self
            .client
            .post(self.url(&format!("/users/{}/playlists", user_id)))
            .json(playlist);
        self.send(request, "create playlist").await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        for chunk in uris.chunks(MAX_URIS_PER_REQUEST) {
            let request = self
                .client
                .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
                .json(&serde_json::json!({ "uris": chunk }));
            let _: serde_json::Value = self.send(request, "add tracks").await?;
        }

        Ok(())
    }
}
