pub mod auth;
pub mod catalog;
pub mod enricher;
pub mod generator;
pub mod openai;
pub mod prompt;
pub mod publisher;
pub mod session;
pub mod spotify;
pub mod taste;

pub use auth::AuthService;
pub use catalog::MusicCatalog;
pub use generator::PlaylistGenerator;
pub use openai::{LanguageModel, OpenAiClient};
pub use session::{InMemorySessionStore, Session, SessionStore};
pub use spotify::SpotifyClient;
