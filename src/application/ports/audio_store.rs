use std::io;
use std::path::PathBuf;

use bytes::Bytes;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait AudioStore: Send + Sync {
    /// Returns the number of bytes written.
    async fn save(&self, path: &StoragePath, data: Bytes) -> Result<u64, AudioStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError>;

    /// Local filesystem location the transcription engine can read from.
    fn locate(&self, path: &StoragePath) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
