use async_trait::async_trait;

use crate::domain::{Transcription, TranscriptionId, TranscriptionStatus};

use super::RepositoryError;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionFilter {
    pub status: Option<TranscriptionStatus>,
    pub language: Option<String>,
    /// Case-insensitive substring of the stored audio path.
    pub audio_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionQuery {
    pub offset: i64,
    pub limit: i64,
    pub filter: TranscriptionFilter,
}

impl TranscriptionQuery {
    /// Clamps offset to `>= 0` and limit to `1..=MAX_PAGE_LIMIT`.
    pub fn new(offset: Option<i64>, limit: Option<i64>, filter: TranscriptionFilter) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            filter,
        }
    }
}

impl Default for TranscriptionQuery {
    fn default() -> Self {
        Self::new(None, None, TranscriptionFilter::default())
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptionPage {
    pub items: Vec<Transcription>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[async_trait]
pub trait TranscriptionRepository: Send + Sync {
    async fn create(&self, transcription: &Transcription) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: TranscriptionId)
    -> Result<Option<Transcription>, RepositoryError>;

    /// Persists text, language, duration, status and error of an existing row.
    async fn update(&self, transcription: &Transcription) -> Result<(), RepositoryError>;

    /// Returns `false` when no row had this id.
    async fn delete(&self, id: TranscriptionId) -> Result<bool, RepositoryError>;

    /// Newest first.
    async fn list(&self, query: &TranscriptionQuery) -> Result<TranscriptionPage, RepositoryError>;
}
