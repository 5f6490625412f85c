use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::services::Session;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// JSON body whose decode failures come back as `AppError::Validation` (400)
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Bearer token from the Authorization header, if any
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the caller's session or rejects with 401
pub struct RequireSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

        let session = state.auth_service.verify_token(token).await?;

        Ok(RequireSession(session))
    }
}

/// Just the bearer token, without requiring a live session (used by logout)
pub struct RequireToken(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &Arc<AppState>) -> Result<Self> {
        bearer_token(parts)
            .map(|t| RequireToken(t.to_string()))
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))
    }
}
