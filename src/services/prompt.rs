//! Prompt text for playlist generation and refinement.
//!
//! Everything here is a pure function of its inputs so the exact wording
//! sent to the model can be asserted in tests.

use crate::models::{PlaylistItem, TasteProfile};

pub const SYSTEM_PROMPT: &str = "You are a spotify playlist generator bot.";

const FORMAT_INSTRUCTIONS: &str = "Respond ONLY with a JSON array of objects, each with exactly two string fields, \"track\" and \"artist\", e.g. [{\"track\": \"Song Name\", \"artist\": \"Artist Name\"}]. Do not include any other text, explanation or Markdown.";

pub fn compose_generation_prompt(taste: &TasteProfile, user_prompt: &str) -> String {
    compose_prompt(taste, user_prompt, None, None)
}

pub fn compose_refinement_prompt(
    taste: &TasteProfile,
    instruction: &str,
    playlist: &[PlaylistItem],
    original_prompt: Option<&str>,
) -> String {
    compose_prompt(taste, instruction, Some(playlist), original_prompt)
}

fn compose_prompt(
    taste: &TasteProfile,
    user_prompt: &str,
    existing: Option<&[PlaylistItem]>,
    prior_prompt: Option<&str>,
) -> String {
    let mut sections = vec![taste_section(taste)];

    match existing {
        None => {
            sections.push(format!(
                "USER REQUEST (top priority): \"{}\"",
                user_prompt.trim()
            ));
            sections.push(
                "Generate a playlist that satisfies the user request first and foremost, \
                 weighted toward the listening taste above."
                    .to_string(),
            );
        }
        Some(playlist) => {
            if let Some(prior) = prior_prompt.map(str::trim).filter(|p| !p.is_empty()) {
                sections.push(format!("ORIGINAL REQUEST: \"{}\"", prior));
            }
            sections.push(format!("CURRENT PLAYLIST:\n{}", playlist_json(playlist)));
            sections.push(format!(
                "CHANGE REQUEST (top priority): \"{}\"",
                user_prompt.trim()
            ));
            sections.push(
                "Return the full updated playlist. Keep every track from the current playlist \
                 unless the change request says to remove or replace it, and keep the listening \
                 taste above in mind for any additions."
                    .to_string(),
            );
        }
    }

    sections.push(FORMAT_INSTRUCTIONS.to_string());
    sections.join("\n\n")
}

fn taste_section(taste: &TasteProfile) -> String {
    let mut lines = vec!["USER LISTENING TASTE:".to_string()];

    if !taste.genre_counts.is_empty() {
        lines.push(format!("- Genres: {}", taste.genre_summary()));
    }
    if !taste.top_artists.is_empty() {
        lines.push(format!("- Top artists: {}", taste.top_artists.join(", ")));
    }
    if !taste.top_tracks.is_empty() {
        let tracks: Vec<String> = taste
            .top_tracks
            .iter()
            .map(|(track, artist)| format!("{} by {}", track, artist))
            .collect();
        lines.push(format!("- Top tracks: {}", tracks.join(", ")));
    }
    if lines.len() == 1 {
        lines.push("- No listening history available".to_string());
    }

    lines.join("\n")
}

/// Only track/artist go back to the model; enrichment fields are noise to it
fn playlist_json(playlist: &[PlaylistItem]) -> String {
    let pairs: Vec<serde_json::Value> = playlist
        .iter()
        .map(|item| serde_json::json!({ "track": item.track, "artist": item.artist }))
        .collect();
    serde_json::Value::Array(pairs).to_string()
}
