use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::ports::{AudioStoreError, RepositoryError, TranscriptionError};
use crate::application::services::{ErrorCategory, InvokeError, TranscriptionServiceError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Error returned from handlers, rendered as `{"error": {code, message, details}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "missing_field",
            format!("Missing required field: {}", field),
        )
        .with_details(json!({ "field": field }))
    }

    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_field", message)
            .with_details(json!({ "field": field }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "Request failed");
        } else {
            tracing::warn!(code = self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorEnvelope {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => {
                ApiError::not_found(format!("Not found: {}", what))
            }
            other => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                other.to_string(),
            ),
        }
    }
}

impl From<AudioStoreError> for ApiError {
    fn from(e: AudioStoreError) -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_failure",
            e.to_string(),
        )
    }
}

impl From<InvokeError> for ApiError {
    fn from(e: InvokeError) -> Self {
        let message = e.to_string();
        let details = json!({
            "kind": e.kind(),
            "subject": e.subject(),
            "attempts": e.attempts_made(),
        });

        let (status, code) = match (&e, e.category()) {
            (InvokeError::AudioNotFound(_), _) => (StatusCode::NOT_FOUND, "audio_not_found"),
            (InvokeError::UnsupportedFormat(_), _) => {
                (StatusCode::BAD_REQUEST, "invalid_file_type")
            }
            (_, ErrorCategory::LocalPrecondition) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
            }
            (_, ErrorCategory::TransientRemote) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
            }
            (_, ErrorCategory::PermanentRemote) => match e.remote_error() {
                Some(TranscriptionError::InvalidRequest(_)) => {
                    (StatusCode::BAD_REQUEST, "invalid_request")
                }
                _ => (StatusCode::BAD_GATEWAY, "api_failure"),
            },
        };

        ApiError::new(status, code, message).with_details(details)
    }
}

impl From<TranscriptionServiceError> for ApiError {
    fn from(e: TranscriptionServiceError) -> Self {
        match e {
            TranscriptionServiceError::EmptyUpload(filename) => ApiError::invalid_field(
                "file",
                format!("Uploaded file is empty: {}", filename),
            ),
            TranscriptionServiceError::UnsupportedFormat {
                filename,
                content_type,
            } => ApiError::new(
                StatusCode::BAD_REQUEST,
                "invalid_file_type",
                format!(
                    "Unsupported file type for {}. Supported formats: wav, mp3, m4a",
                    filename
                ),
            )
            .with_details(json!({ "content_type": content_type })),
            TranscriptionServiceError::FileTooLarge { size, max } => ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "file_size_exceeded",
                format!("File exceeds maximum size of {} MB", max / (1024 * 1024)),
            )
            .with_details(json!({ "size": size, "max_size": max })),
            TranscriptionServiceError::NotFound(id) => {
                ApiError::not_found(format!("Transcription not found: {}", id.as_uuid()))
            }
            TranscriptionServiceError::Storage(e) => e.into(),
            TranscriptionServiceError::Repository(e) => e.into(),
            TranscriptionServiceError::Invoke(e) => e.into(),
        }
    }
}
