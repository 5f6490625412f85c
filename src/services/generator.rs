use crate::error::{AppError, Result};
use crate::models::{PlaylistItem, TasteProfile};
use crate::services::openai::{ChatMessage, LanguageModel};
use crate::services::prompt::{self, SYSTEM_PROMPT};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Model output together with the items normalized out of it
#[derive(Debug, Clone)]
pub struct GeneratedPlaylist {
    pub raw: String,
    pub items: Vec<PlaylistItem>,
}

pub struct PlaylistGenerator {
    model: Arc<dyn LanguageModel>,
}

impl PlaylistGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, taste: &TasteProfile, user_prompt: &str) -> Result<GeneratedPlaylist> {
        info!("Generating playlist for prompt: {}", user_prompt);
        let prompt = prompt::compose_generation_prompt(taste, user_prompt);
        self.run(prompt).await
    }

    /// The model gets the whole current playlist and returns a replacement;
    /// nothing is merged locally.
    pub async fn refine(
        &self,
        taste: &TasteProfile,
        instruction: &str,
        playlist: &[PlaylistItem],
        original_prompt: Option<&str>,
    ) -> Result<GeneratedPlaylist> {
        info!(
            "Refining {}-track playlist with instruction: {}",
            playlist.len(),
            instruction
        );
        let prompt =
            prompt::compose_refinement_prompt(taste, instruction, playlist, original_prompt);
        self.run(prompt).await
    }

    async fn run(&self, prompt: String) -> Result<GeneratedPlaylist> {
        let raw = self
            .model
            .complete(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
            .await?;

        debug!("Model response: {}", raw);

        let items = normalize_playlist(&raw)?;
        info!("Model suggested {} tracks", items.len());

        Ok(GeneratedPlaylist { raw, items })
    }
}

/// Turns free-form model text into ordered playlist items.
///
/// Accepts a bare JSON array, the same wrapped in a Markdown code fence, or
/// an object with a `playlist` array. Anything else is a `PlaylistParse` error.
pub fn normalize_playlist(raw: &str) -> Result<Vec<PlaylistItem>> {
    let body = strip_code_fences(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::PlaylistParse(format!("{} | Response was: {}", e, raw)))?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("playlist") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(AppError::PlaylistParse(
                    "object without a \"playlist\" array".to_string(),
                ))
            }
        },
        other => {
            return Err(AppError::PlaylistParse(format!(
                "expected a JSON array, got: {}",
                other
            )))
        }
    };

    Ok(entries.iter().map(item_from_value).collect())
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };

    // Skip the info string, e.g. ```json
    let after_open = trimmed[open + 3..].trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let body = match after_open.find("```") {
        Some(close) => &after_open[..close],
        None => after_open,
    };
    body.trim()
}

/// Missing or non-string fields become empty strings rather than errors
fn item_from_value(value: &Value) -> PlaylistItem {
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string()
    };
    PlaylistItem::new(field("track"), field("artist"))
}
