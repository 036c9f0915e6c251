use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::application::ports::{
    EngineTranscript, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
    TranscriptionRequest,
};
use crate::application::retry::{
    FailureClass, RetryContext, RetryController, RetryFailure, RetryPolicy, StopReason,
};
use crate::domain::AudioFormat;

const OPERATION_NAME: &str = "transcribe_audio";

/// Where an [`InvokeError`] originated, for choosing a client-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    LocalPrecondition,
    TransientRemote,
    PermanentRemote,
}

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("audio file not found: {}", .0.display())]
    AudioNotFound(PathBuf),
    #[error("unsupported audio format: {} (expected wav, mp3 or m4a)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to read audio file {}: {source}", path.display())]
    AudioUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("transcription of {subject} failed: {failure}")]
    Remote {
        subject: String,
        #[source]
        failure: RetryFailure<TranscriptionError>,
    },
}

impl InvokeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InvokeError::Remote { failure, .. } => match failure.class() {
                FailureClass::Transient => ErrorCategory::TransientRemote,
                FailureClass::Permanent => ErrorCategory::PermanentRemote,
            },
            _ => ErrorCategory::LocalPrecondition,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InvokeError::AudioNotFound(_) => "AudioNotFound",
            InvokeError::UnsupportedFormat(_) => "UnsupportedFormat",
            InvokeError::AudioUnreadable { .. } => "AudioUnreadable",
            InvokeError::Remote { failure, .. } => failure.kind(),
        }
    }

    pub fn subject(&self) -> String {
        match self {
            InvokeError::AudioNotFound(path)
            | InvokeError::UnsupportedFormat(path)
            | InvokeError::AudioUnreadable { path, .. } => path.display().to_string(),
            InvokeError::Remote { subject, .. } => subject.clone(),
        }
    }

    /// Remote calls made before giving up. Zero for local precondition failures.
    pub fn attempts_made(&self) -> u32 {
        match self {
            InvokeError::Remote { failure, .. } => failure.attempts_made(),
            _ => 0,
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            InvokeError::Remote { failure, .. } => Some(failure.reason()),
            _ => None,
        }
    }

    pub fn remote_error(&self) -> Option<&TranscriptionError> {
        match self {
            InvokeError::Remote { failure, .. } => Some(failure.error()),
            _ => None,
        }
    }
}

/// Sends a local audio file to the remote transcription engine, retrying
/// transient failures.
pub struct TranscriptionInvoker {
    engine: Arc<dyn TranscriptionEngine>,
    retry: RetryController,
}

impl TranscriptionInvoker {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, retry: RetryController) -> Self {
        Self { engine, retry }
    }

    pub fn with_default_policy(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self::new(engine, RetryController::new(RetryPolicy::default()))
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.retry.policy()
    }

    pub async fn transcribe(
        &self,
        audio: &Path,
        options: &TranscriptionOptions,
    ) -> Result<String, InvokeError> {
        self.transcribe_detailed(audio, options)
            .await
            .map(|t| t.text)
    }

    #[tracing::instrument(skip(self, audio, options), fields(audio = %audio.display()))]
    pub async fn transcribe_detailed(
        &self,
        audio: &Path,
        options: &TranscriptionOptions,
    ) -> Result<EngineTranscript, InvokeError> {
        let format = validate_audio_reference(audio).await?;

        let data = tokio::fs::read(audio)
            .await
            .map_err(|source| InvokeError::AudioUnreadable {
                path: audio.to_path_buf(),
                source,
            })?;

        let filename = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("audio.{}", format.extension()));

        debug!(
            bytes = data.len(),
            format = %format,
            language = options.language.as_deref().unwrap_or("auto"),
            has_prompt = options.prompt.is_some(),
            response_format = %options.response_format,
            "Starting transcription"
        );

        let request = TranscriptionRequest {
            audio: Bytes::from(data),
            filename,
            format,
            options: options.clone(),
        };

        let subject = audio.display().to_string();
        let context = RetryContext::new(OPERATION_NAME).with_subject(subject.clone());

        let retried = self
            .retry
            .execute(&context, || self.engine.transcribe(&request))
            .await
            .map_err(|failure| InvokeError::Remote { subject, failure })?;

        info!(
            chars = retried.value.text.chars().count(),
            attempts = retried.attempts_made(),
            "Transcription completed"
        );

        Ok(retried.value)
    }
}

async fn validate_audio_reference(path: &Path) -> Result<AudioFormat, InvokeError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InvokeError::AudioNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(InvokeError::AudioUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(InvokeError::AudioNotFound(path.to_path_buf()));
    }

    AudioFormat::from_path(path).ok_or_else(|| InvokeError::UnsupportedFormat(path.to_path_buf()))
}
