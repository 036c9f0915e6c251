use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{ResponseFormat, TranscriptionOptions};
use crate::application::services::AudioUpload;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct TranscriptionMetadata {
    pub language_detected: Option<String>,
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcription_id: String,
    pub text: String,
    pub metadata: TranscriptionMetadata,
    pub created_at: DateTime<Utc>,
}

struct TranscribeForm {
    upload: Option<AudioUpload>,
    options: TranscriptionOptions,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let form = read_form(multipart).await?;
    let upload = form.upload.ok_or_else(|| ApiError::missing_field("file"))?;

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        language = form.options.language.as_deref().unwrap_or("auto"),
        prompt = %form.options.prompt.as_deref().map(sanitize_prompt).unwrap_or_default(),
        "Transcription requested"
    );

    let transcription = state
        .transcription_service
        .transcribe_upload(upload, form.options)
        .await?;

    Ok(Json(TranscribeResponse {
        transcription_id: transcription.id.as_uuid().to_string(),
        text: transcription.text.unwrap_or_default(),
        metadata: TranscriptionMetadata {
            language_detected: transcription.language,
            duration: transcription.duration_seconds,
        },
        created_at: transcription.created_at,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<TranscribeForm, ApiError> {
    let mut form = TranscribeForm {
        upload: None,
        options: TranscriptionOptions::default(),
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" | "audio" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data: Bytes = field.bytes().await.map_err(multipart_error)?;
                form.upload = Some(AudioUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            "language" => {
                let value = field.text().await.map_err(multipart_error)?;
                form.options.language = parse_language(&value)?;
            }
            "prompt" => {
                form.options.prompt = non_empty(field.text().await.map_err(multipart_error)?);
            }
            "model" => {
                form.options.model = non_empty(field.text().await.map_err(multipart_error)?);
            }
            "response_format" => {
                let value = field.text().await.map_err(multipart_error)?;
                form.options.response_format = value
                    .parse::<ResponseFormat>()
                    .map_err(|e| ApiError::invalid_field("response_format", e))?;
            }
            "temperature" => {
                let value = field.text().await.map_err(multipart_error)?;
                form.options.temperature = parse_temperature(&value)?;
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Longest language tag the `language_detected` column holds.
const MAX_LANGUAGE_TAG_CHARS: usize = 16;

/// Accepts ISO 639 codes (`en`, `fas`) with optional subtags (`pt-BR`).
fn parse_language(value: &str) -> Result<Option<String>, ApiError> {
    let Some(tag) = non_empty(value.to_string()) else {
        return Ok(None);
    };

    let mut subtags = tag.split('-');
    let primary_ok = subtags.next().is_some_and(|p| {
        (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic())
    });
    let rest_ok = subtags.all(|s| {
        (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
    });

    if !primary_ok || !rest_ok || tag.len() > MAX_LANGUAGE_TAG_CHARS {
        return Err(ApiError::invalid_field(
            "language",
            format!("language must be an ISO 639 code such as 'en' or 'fa', got '{}'", tag),
        ));
    }

    Ok(Some(tag))
}

fn parse_temperature(value: &str) -> Result<f32, ApiError> {
    let temperature: f32 = value
        .trim()
        .parse()
        .map_err(|_| ApiError::invalid_field("temperature", "temperature must be a number"))?;

    if !(0.0..=1.0).contains(&temperature) {
        return Err(ApiError::invalid_field(
            "temperature",
            "temperature must be between 0 and 1",
        ));
    }

    Ok(temperature)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "file_size_exceeded",
            "Uploaded file exceeds the maximum request size",
        );
    }
    ApiError::invalid_field("file", format!("Invalid multipart body: {}", e.body_text()))
}
