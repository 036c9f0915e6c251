use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{LexiconEntry, LexiconSource};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct LexiconEntryResponse {
    pub id: i64,
    pub term: String,
    pub correction: String,
    pub frequency: i64,
    pub source: &'static str,
}

impl From<LexiconEntry> for LexiconEntryResponse {
    fn from(e: LexiconEntry) -> Self {
        Self {
            id: e.id,
            term: e.term,
            correction: e.correction,
            frequency: e.frequency,
            source: e.source.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpsertLexiconRequest {
    pub term: Option<String>,
    pub correction: Option<String>,
    pub source: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn list_lexicon_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LexiconEntryResponse>>, ApiError> {
    let entries = state.lexicon_repository.list().await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Source defaults to `user_feedback` when omitted.
#[tracing::instrument(skip(state, payload))]
pub async fn upsert_lexicon_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpsertLexiconRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LexiconEntryResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::invalid_field("body", e.body_text()))?;
    let term = required(request.term, "term")?;
    let correction = required(request.correction, "correction")?;
    let source = match request.source.as_deref() {
        Some(raw) => raw
            .parse::<LexiconSource>()
            .map_err(|e| ApiError::invalid_field("source", e))?,
        None => LexiconSource::UserFeedback,
    };

    let entry = state
        .lexicon_repository
        .upsert(&term, &correction, source)
        .await?;

    tracing::info!(entry_id = entry.id, source = %source, "Lexicon entry saved");
    Ok((StatusCode::CREATED, Json(entry.into())))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}
