use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StoragePath, TranscriptionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranscriptionId(Uuid);

impl TranscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TranscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub id: TranscriptionId,
    pub audio_file_path: StoragePath,
    pub text: Option<String>,
    pub language: Option<String>,
    pub duration_seconds: Option<f64>,
    pub status: TranscriptionStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcription {
    /// A pending record for audio that has been stored but not yet transcribed.
    pub fn pending(id: TranscriptionId, audio_file_path: StoragePath) -> Self {
        let now = Utc::now();
        Self {
            id,
            audio_file_path,
            text: None,
            language: None,
            duration_seconds: None,
            status: TranscriptionStatus::Pending,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn complete(
        &mut self,
        text: String,
        language: Option<String>,
        duration_seconds: Option<f64>,
    ) {
        self.text = Some(text);
        self.language = language;
        self.duration_seconds = duration_seconds;
        self.status = TranscriptionStatus::Completed;
        self.error_message = None;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, error_message: impl Into<String>) {
        self.status = TranscriptionStatus::Failed;
        self.error_message = Some(error_message.into());
        self.updated_at = Utc::now();
    }
}
