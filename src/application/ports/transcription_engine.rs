use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::retry::{ClassifyFailure, FailureClass};
use crate::domain::AudioFormat;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
    VerboseJson,
    Srt,
    Vtt,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::Json => "json",
            ResponseFormat::VerboseJson => "verbose_json",
            ResponseFormat::Srt => "srt",
            ResponseFormat::Vtt => "vtt",
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResponseFormat::Json | ResponseFormat::VerboseJson)
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ResponseFormat::Text),
            "json" => Ok(ResponseFormat::Json),
            "verbose_json" => Ok(ResponseFormat::VerboseJson),
            "srt" => Ok(ResponseFormat::Srt),
            "vtt" => Ok(ResponseFormat::Vtt),
            other => Err(format!("Invalid response format: {}", other)),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_MODEL: &str = "whisper-1";

/// Caller-tunable knobs of a transcription request.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOptions {
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub response_format: ResponseFormat,
    /// `None` lets the engine use its configured model.
    pub model: Option<String>,
    pub temperature: f32,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: None,
            prompt: None,
            response_format: ResponseFormat::Text,
            model: None,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub audio: Bytes,
    pub filename: String,
    pub format: AudioFormat,
    pub options: TranscriptionOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineTranscript {
    pub text: String,
    pub language: Option<String>,
    pub duration_seconds: Option<f64>,
}

impl EngineTranscript {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranscriptionError {
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("upstream api error: {0}")]
    Api(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("upstream internal server error: {0}")]
    InternalServer(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Unclassified(String),
}

impl ClassifyFailure for TranscriptionError {
    fn kind(&self) -> &'static str {
        match self {
            TranscriptionError::RateLimited(_) => "RateLimited",
            TranscriptionError::Timeout(_) => "Timeout",
            TranscriptionError::Api(_) => "Api",
            TranscriptionError::Connection(_) => "Connection",
            TranscriptionError::ServiceUnavailable(_) => "ServiceUnavailable",
            TranscriptionError::InternalServer(_) => "InternalServer",
            TranscriptionError::Authentication(_) => "Authentication",
            TranscriptionError::InvalidRequest(_) => "InvalidRequest",
            TranscriptionError::PermissionDenied(_) => "PermissionDenied",
            TranscriptionError::NotFound(_) => "NotFound",
            TranscriptionError::Unclassified(_) => "Unclassified",
        }
    }

    fn declared_class(&self) -> Option<FailureClass> {
        match self {
            TranscriptionError::RateLimited(_)
            | TranscriptionError::Timeout(_)
            | TranscriptionError::Api(_)
            | TranscriptionError::Connection(_)
            | TranscriptionError::ServiceUnavailable(_)
            | TranscriptionError::InternalServer(_) => Some(FailureClass::Transient),
            TranscriptionError::Authentication(_)
            | TranscriptionError::InvalidRequest(_)
            | TranscriptionError::PermissionDenied(_)
            | TranscriptionError::NotFound(_) => Some(FailureClass::Permanent),
            TranscriptionError::Unclassified(_) => None,
        }
    }
}
