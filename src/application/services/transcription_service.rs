use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::ports::{
    AudioStore, AudioStoreError, LexiconRepository, RepositoryError, TranscriptionOptions,
    TranscriptionPage, TranscriptionQuery, TranscriptionRepository,
};
use crate::domain::{AudioFormat, StoragePath, Transcription, TranscriptionId};

use super::{InvokeError, LexiconCorrector, TranscriptionInvoker, normalize_transcript};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// An audio file received from a client.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("empty upload: {0}")]
    EmptyUpload(String),
    #[error("unsupported file type for {filename} ({content_type})")]
    UnsupportedFormat {
        filename: String,
        content_type: String,
    },
    #[error("file of {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },
    #[error("transcription not found: {}", .0.as_uuid())]
    NotFound(TranscriptionId),
    #[error("storage: {0}")]
    Storage(#[from] AudioStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

pub struct TranscriptionService {
    invoker: TranscriptionInvoker,
    repository: Arc<dyn TranscriptionRepository>,
    lexicon: Arc<dyn LexiconRepository>,
    audio_store: Arc<dyn AudioStore>,
    max_upload_bytes: u64,
}

impl TranscriptionService {
    pub fn new(
        invoker: TranscriptionInvoker,
        repository: Arc<dyn TranscriptionRepository>,
        lexicon: Arc<dyn LexiconRepository>,
        audio_store: Arc<dyn AudioStore>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            invoker,
            repository,
            lexicon,
            audio_store,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Stores the upload, transcribes it and persists the outcome.
    ///
    /// The record is created as pending before the remote call and ends up
    /// either completed or failed. No database handle is held while the
    /// invoker waits between attempts.
    #[tracing::instrument(skip(self, upload, options), fields(filename = %upload.filename))]
    pub async fn transcribe_upload(
        &self,
        upload: AudioUpload,
        options: TranscriptionOptions,
    ) -> Result<Transcription, TranscriptionServiceError> {
        let format = resolve_format(&upload)?;

        let size = upload.data.len() as u64;
        if size == 0 {
            return Err(TranscriptionServiceError::EmptyUpload(upload.filename));
        }
        if size > self.max_upload_bytes {
            return Err(TranscriptionServiceError::FileTooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }

        let id = TranscriptionId::new();
        let path = StoragePath::for_audio(&id, format, Utc::now());

        self.audio_store.save(&path, upload.data).await?;

        let mut transcription = Transcription::pending(id, path.clone());
        self.repository.create(&transcription).await?;

        let location = self.audio_store.locate(&path);

        match self.invoker.transcribe_detailed(&location, &options).await {
            Ok(transcript) => {
                let text = self.post_process(&transcript.text).await;
                let language = transcript.language.or_else(|| options.language.clone());
                transcription.complete(text, language, transcript.duration_seconds);
                if let Err(e) = self.repository.update(&transcription).await {
                    error!(
                        transcription_id = %id.as_uuid(),
                        path = %path,
                        error = %e,
                        "Failed to store completed transcription"
                    );
                    transcription.fail(format!("failed to store transcript: {}", e));
                    if let Err(fail_err) = self.repository.update(&transcription).await {
                        warn!(
                            transcription_id = %id.as_uuid(),
                            error = %fail_err,
                            "Failed to record transcription failure"
                        );
                    }
                    return Err(e.into());
                }

                info!(
                    transcription_id = %id.as_uuid(),
                    path = %path,
                    "Transcription stored"
                );
                Ok(transcription)
            }
            Err(e) => {
                transcription.fail(e.to_string());
                if let Err(update_err) = self.repository.update(&transcription).await {
                    warn!(
                        transcription_id = %id.as_uuid(),
                        error = %update_err,
                        "Failed to record transcription failure"
                    );
                }
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: TranscriptionId) -> Result<Transcription, TranscriptionServiceError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TranscriptionServiceError::NotFound(id))
    }

    pub async fn list(
        &self,
        query: &TranscriptionQuery,
    ) -> Result<TranscriptionPage, TranscriptionServiceError> {
        Ok(self.repository.list(query).await?)
    }

    /// Deletes the record, then makes a best-effort attempt to remove its audio.
    pub async fn delete(&self, id: TranscriptionId) -> Result<(), TranscriptionServiceError> {
        let transcription = self.get(id).await?;

        if !self.repository.delete(id).await? {
            return Err(TranscriptionServiceError::NotFound(id));
        }

        if let Err(e) = self.audio_store.delete(&transcription.audio_file_path).await {
            warn!(
                transcription_id = %id.as_uuid(),
                path = %transcription.audio_file_path,
                error = %e,
                "Failed to delete stored audio"
            );
        }

        info!(transcription_id = %id.as_uuid(), "Transcription deleted");
        Ok(())
    }

    async fn post_process(&self, raw: &str) -> String {
        let normalized = normalize_transcript(raw);

        let entries = match self.lexicon.list().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Lexicon unavailable, skipping corrections");
                return normalized;
            }
        };

        let corrected = LexiconCorrector::new(&entries).apply(&normalized);

        if !corrected.applied.is_empty() {
            if let Err(e) = self.lexicon.record_hits(&corrected.applied).await {
                warn!(error = %e, "Failed to record lexicon usage");
            }
        }

        corrected.text
    }
}

fn resolve_format(upload: &AudioUpload) -> Result<AudioFormat, TranscriptionServiceError> {
    AudioFormat::from_filename(&upload.filename)
        .or_else(|| upload.content_type.as_deref().and_then(AudioFormat::from_mime))
        .ok_or_else(|| TranscriptionServiceError::UnsupportedFormat {
            filename: upload.filename.clone(),
            content_type: upload
                .content_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        })
}
