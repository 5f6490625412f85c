use crate::api::middleware::RequireToken;
use crate::api::AppState;
use crate::error::{AppError, Result};
use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
}

async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let url = state.auth_service.begin_login().await?;
    Ok(Redirect::to(&url))
}

/// Spotify sends the browser here with a one-time code after consent
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect> {
    if let Some(error) = query.error {
        tracing::warn!("Spotify authorization was not granted: {}", error);
        let url = frontend_url(&state, "/", &[("error", error.as_str())])?;
        return Ok(Redirect::to(&url));
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Missing authorization code.".to_string()))?;

    let token = state
        .auth_service
        .complete_login(&code, query.state.as_deref())
        .await?;

    let url = frontend_url(&state, "/home", &[("token", token.as_str())])?;
    Ok(Redirect::to(&url))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    RequireToken(token): RequireToken,
) -> Result<Redirect> {
    state.auth_service.logout(&token).await;
    let url = frontend_url(&state, "/", &[])?;
    Ok(Redirect::to(&url))
}

fn frontend_url(state: &AppState, path: &str, params: &[(&str, &str)]) -> Result<String> {
    let base = format!("{}{}", state.frontend_url, path);
    let url = if params.is_empty() {
        Url::parse(&base)
    } else {
        Url::parse_with_params(&base, params)
    };

    url.map(|u| u.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid FRONTEND_URL: {}", e)))
}
