use reqwest::StatusCode;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{
    EngineTranscript, ResponseFormat, TranscriptionError, TranscriptionRequest,
};

#[derive(Deserialize)]
struct WhisperJsonResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Multipart body shared by the OpenAI and Azure Whisper endpoints. Azure
/// selects the model by deployment, so `model` is optional.
pub(super) fn build_form(
    request: &TranscriptionRequest,
    model: Option<&str>,
) -> Result<multipart::Form, TranscriptionError> {
    let file_part = multipart::Part::bytes(request.audio.to_vec())
        .file_name(request.filename.clone())
        .mime_str(request.format.as_mime())
        .map_err(|e| TranscriptionError::InvalidRequest(format!("mime: {}", e)))?;

    let options = &request.options;
    let mut form = multipart::Form::new()
        .text("response_format", options.response_format.as_str())
        .text("temperature", options.temperature.to_string())
        .part("file", file_part);

    if let Some(model) = model {
        form = form.text("model", model.to_string());
    }
    if let Some(language) = &options.language {
        form = form.text("language", language.clone());
    }
    if let Some(prompt) = &options.prompt {
        form = form.text("prompt", prompt.clone());
    }

    Ok(form)
}

pub(super) fn map_transport_error(error: reqwest::Error) -> TranscriptionError {
    let message = format!("request: {}", error);
    if error.is_timeout() {
        TranscriptionError::Timeout(message)
    } else if error.is_connect() {
        TranscriptionError::Connection(message)
    } else {
        TranscriptionError::Unclassified(message)
    }
}

pub(super) fn map_error_status(status: StatusCode, body: &str) -> TranscriptionError {
    let detail = format!("status {}: {}", status.as_u16(), error_detail(body));

    match status.as_u16() {
        400 => TranscriptionError::InvalidRequest(detail),
        401 => TranscriptionError::Authentication(detail),
        403 => TranscriptionError::PermissionDenied(detail),
        404 => TranscriptionError::NotFound(detail),
        408 | 504 => TranscriptionError::Timeout(detail),
        429 => TranscriptionError::RateLimited(detail),
        500 => TranscriptionError::InternalServer(detail),
        503 => TranscriptionError::ServiceUnavailable(detail),
        500..=599 => TranscriptionError::Api(detail),
        _ => TranscriptionError::Unclassified(detail),
    }
}

pub(super) fn parse_transcript(
    format: ResponseFormat,
    body: String,
) -> Result<EngineTranscript, TranscriptionError> {
    if !format.is_json() {
        return Ok(EngineTranscript::text_only(body.trim()));
    }

    let parsed: WhisperJsonResponse = serde_json::from_str(&body)
        .map_err(|e| TranscriptionError::Api(format!("parse response: {}", e)))?;

    Ok(EngineTranscript {
        text: parsed.text.trim().to_string(),
        language: parsed.language,
        duration_seconds: parsed.duration,
    })
}

fn error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

pub(super) async fn read_response(
    response: reqwest::Response,
    format: ResponseFormat,
) -> Result<EngineTranscript, TranscriptionError> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(map_error_status(status, &body));
    }

    let body = response.text().await.map_err(map_transport_error)?;
    parse_transcript(format, body)
}
