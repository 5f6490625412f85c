use crate::error::{AppError, Result};
use crate::services::session::{Session, SessionStore};
use crate::services::spotify::SpotifyClient;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// How long a `state` issued at /login stays redeemable
const LOGIN_STATE_TTL_MINUTES: i64 = 10;

/// Upper bound on outstanding login states; the oldest are evicted first
const MAX_PENDING_STATES: usize = 1024;

pub struct AuthService {
    spotify: SpotifyClient,
    sessions: Arc<dyn SessionStore>,
    pending_states: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl AuthService {
    pub fn new(spotify: SpotifyClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            spotify,
            sessions,
            pending_states: RwLock::new(HashMap::new()),
        }
    }

    /// Issues a fresh single-use state and returns the Spotify authorize URL
    pub async fn begin_login(&self) -> Result<String> {
        let state = Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        {
            let mut pending = self.pending_states.write().await;
            pending.retain(|_, issued| now - *issued < Duration::minutes(LOGIN_STATE_TTL_MINUTES));
            while pending.len() >= MAX_PENDING_STATES {
                let oldest = pending
                    .iter()
                    .min_by_key(|(_, issued)| **issued)
                    .map(|(key, _)| key.clone());
                match oldest {
                    Some(key) => pending.remove(&key),
                    None => break,
                };
            }
            pending.insert(state.clone(), now);
        }

        self.spotify.authorize_url(&state)
    }

    /// Redeems the authorization code and stores the new session.
    /// Returns the access token that identifies the session from now on.
    pub async fn complete_login(&self, code: &str, state: Option<&str>) -> Result<String> {
        if let Some(state) = state {
            let issued = self.pending_states.write().await.remove(state);
            match issued {
                Some(at) if Utc::now() - at < Duration::minutes(LOGIN_STATE_TTL_MINUTES) => {}
                _ => return Err(AppError::Validation("Unknown or expired login state".to_string())),
            }
        }

        let grant = self.spotify.exchange_code(code).await?;
        let catalog = Arc::new(self.spotify.user_api(&grant.access_token));

        self.sessions
            .put(Session::new(
                grant.access_token.clone(),
                grant.refresh_token,
                catalog,
            ))
            .await;

        tracing::info!("New session created (token expires in {}s)", grant.expires_in);

        Ok(grant.access_token)
    }

    pub async fn verify_token(&self, token: &str) -> Result<Session> {
        self.sessions
            .get(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))
    }

    pub async fn logout(&self, token: &str) {
        match self.sessions.delete(token).await {
            Some(session) => tracing::info!(
                "Session ended after {} minutes",
                (Utc::now() - session.created_at).num_minutes()
            ),
            None => tracing::debug!("Logout for unknown token"),
        }
    }
}
