use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{TranscriptionFilter, TranscriptionQuery};
use crate::domain::{Transcription, TranscriptionId, TranscriptionStatus};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub id: String,
    pub audio_file_path: String,
    pub transcription_text: Option<String>,
    pub language_detected: Option<String>,
    pub duration: Option<f64>,
    pub status: &'static str,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transcription> for TranscriptionResponse {
    fn from(t: Transcription) -> Self {
        Self {
            id: t.id.as_uuid().to_string(),
            audio_file_path: t.audio_file_path.as_str().to_string(),
            transcription_text: t.text,
            language_detected: t.language,
            duration: t.duration_seconds,
            status: t.status.as_str(),
            error_message: t.error_message,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptionListResponse {
    pub items: Vec<TranscriptionResponse>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub language: Option<String>,
    pub audio_path: Option<String>,
}

fn parse_id(raw: &str) -> Result<TranscriptionId, ApiError> {
    Uuid::parse_str(raw)
        .map(TranscriptionId::from_uuid)
        .map_err(|_| ApiError::invalid_field("id", format!("Invalid transcription ID: {}", raw)))
}

#[tracing::instrument(skip(state))]
pub async fn list_transcriptions_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TranscriptionListResponse>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<TranscriptionStatus>)
        .transpose()
        .map_err(|e| ApiError::invalid_field("status", e))?;

    let filter = TranscriptionFilter {
        status,
        language: params.language.filter(|l| !l.is_empty()),
        audio_path: params.audio_path.filter(|p| !p.is_empty()),
    };
    let query = TranscriptionQuery::new(params.offset, params.limit, filter);

    let page = state.transcription_service.list(&query).await?;

    Ok(Json(TranscriptionListResponse {
        items: page.items.into_iter().map(TranscriptionResponse::from).collect(),
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_transcription_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let id = parse_id(&id)?;
    let transcription = state.transcription_service.get(id).await?;
    Ok(Json(transcription.into()))
}

#[tracing::instrument(skip(state))]
pub async fn delete_transcription_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.transcription_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
