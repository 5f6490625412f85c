mod api;
mod config;
mod error;
mod models;
mod services;
#[cfg(test)]
mod test_support;

use crate::api::AppState;
use crate::config::Config;
use crate::services::{
    AuthService, InMemorySessionStore, OpenAiClient, PlaylistGenerator, SpotifyClient,
};
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,playlist_generator=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Panics inside spawned tasks are logged, never fatal to the server
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize services
    let spotify = SpotifyClient::new(&config);
    let sessions = Arc::new(InMemorySessionStore::new());
    let auth_service = Arc::new(AuthService::new(spotify, sessions));
    let generator = Arc::new(PlaylistGenerator::new(Arc::new(OpenAiClient::new(&config))));
    tracing::info!("Using OpenAI model {}", config.openai_model);

    let app_state = Arc::new(AppState {
        auth_service,
        generator,
        frontend_url: config.frontend_url.clone(),
    });

    // Build router
    let app = api::router(app_state)
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
