use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::presentation::config::TranscriptionProviderSetting;
use crate::presentation::state::AppState;

pub const SERVICE_NAME: &str = "medscribe";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ServiceInfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub transcription: TranscriptionInfo,
    pub endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct TranscriptionInfo {
    pub provider: &'static str,
    /// Deployment name for Azure, model name otherwise.
    pub model: String,
    pub max_attempts: u32,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: SERVICE_VERSION,
    })
}

pub async fn root_handler(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    let transcription = &state.settings.transcription;
    let model = match transcription.provider {
        TranscriptionProviderSetting::Azure => transcription
            .azure_deployment
            .clone()
            .unwrap_or_else(|| transcription.model.clone()),
        _ => transcription.model.clone(),
    };

    Json(ServiceInfoResponse {
        name: SERVICE_NAME,
        version: SERVICE_VERSION,
        transcription: TranscriptionInfo {
            provider: transcription.provider.as_str(),
            model,
            max_attempts: transcription.retry.max_attempts,
        },
        endpoints: vec![
            "GET /v1/health",
            "POST /v1/transcribe",
            "GET /v1/transcriptions",
            "GET /v1/transcriptions/{id}",
            "DELETE /v1/transcriptions/{id}",
            "GET /v1/lexicon",
            "POST /v1/lexicon",
        ],
    })
}
