use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Spotify error: {0}")]
    Spotify(String),

    #[error("OpenAI error: {0}")]
    OpenAi(String),

    #[error("Could not parse playlist: {0}")]
    PlaylistParse(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Authentication(ref e) => {
                tracing::error!("Spotify authentication error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to authenticate".to_string())
            }
            AppError::Spotify(ref e) => {
                tracing::error!("Spotify API error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Spotify request failed".to_string())
            }
            AppError::OpenAi(ref e) => {
                tracing::error!("OpenAI API error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate playlist".to_string())
            }
            AppError::PlaylistParse(ref e) => {
                tracing::warn!("Model output could not be normalized: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Could not parse playlist response.".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

pub type Result<T> =std::result::Result<T, AppError>;
