use bytes::Bytes;
use chrono::Utc;

use medscribe::application::ports::{AudioStore, AudioStoreError};
use medscribe::domain::{AudioFormat, StoragePath, TranscriptionId};
use medscribe::infrastructure::storage::LocalAudioStore;

fn create_test_store() -> (tempfile::TempDir, LocalAudioStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalAudioStore::new(dir.path().join("audio")).unwrap();
    (dir, store)
}

fn audio_path() -> StoragePath {
    StoragePath::for_audio(&TranscriptionId::new(), AudioFormat::Wav, Utc::now())
}

#[tokio::test]
async fn given_audio_bytes_when_saving_then_file_written_under_date_directories() {
    let (_dir, store) = create_test_store();
    let path = audio_path();

    let size = store
        .save(&path, Bytes::from_static(b"hello world"))
        .await
        .unwrap();

    assert_eq!(size, 11);
    let located = store.locate(&path);
    assert!(located.starts_with(store.base_path()));
    assert_eq!(std::fs::read(&located).unwrap(), b"hello world");
}

#[tokio::test]
async fn given_saved_audio_when_deleting_then_file_removed() {
    let (_dir, store) = create_test_store();
    let path = audio_path();
    store.save(&path, Bytes::from_static(b"data")).await.unwrap();

    store.delete(&path).await.unwrap();

    assert!(!store.locate(&path).exists());
}

#[tokio::test]
async fn given_nonexistent_audio_when_deleting_then_not_found() {
    let (_dir, store) = create_test_store();

    let result = store.delete(&audio_path()).await;

    assert!(matches!(result, Err(AudioStoreError::NotFound(_))));
}

#[test]
fn given_missing_base_directory_when_creating_store_then_directory_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path().join("nested").join("audio");

    LocalAudioStore::new(base.clone()).unwrap();

    assert!(base.is_dir());
}
