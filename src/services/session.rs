use crate::services::catalog::MusicCatalog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A logged-in user, keyed by the Spotify access token handed to the browser
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub catalog: Arc<dyn MusicCatalog>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        catalog: Arc<dyn MusicCatalog>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            catalog,
            created_at: Utc::now(),
        }
    }
}

/// Token → session lookup. Swappable for an external cache with expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, access_token: &str) -> Option<Session>;

    async fn put(&self, session: Session);

    /// Returns the removed session, if there was one
    async fn delete(&self, access_token: &str) -> Option<Session>;
}

/// Process-local store. Sessions live until logout or restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, access_token: &str) -> Option<Session> {
        self.sessions.read().await.get(access_token).cloned()
    }

    async fn put(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.access_token.clone(), session);
    }

    async fn delete(&self, access_token: &str) -> Option<Session> {
        self.sessions.write().await.remove(access_token)
    }
}
