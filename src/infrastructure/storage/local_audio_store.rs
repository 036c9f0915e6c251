use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tracing::debug;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

/// Keeps uploaded audio under a local directory so the engine can read it back
/// by path.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let base_path = std::fs::canonicalize(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }

    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn save(&self, path: &StoragePath, data: Bytes) -> Result<u64, AudioStoreError> {
        let size = data.len() as u64;
        self.inner
            .put(&StorePath::from(path.as_str()), PutPayload::from(data))
            .await
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;

        debug!(path = %path, size, "Audio saved");
        Ok(size)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError> {
        match self.inner.delete(&StorePath::from(path.as_str())).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                Err(AudioStoreError::NotFound(path.to_string()))
            }
            Err(e) => Err(AudioStoreError::DeleteFailed(e.to_string())),
        }
    }

    fn locate(&self, path: &StoragePath) -> PathBuf {
        self.base_path.join(path.as_str())
    }
}
