use medscribe::application::ports::{
    LexiconRepository, RepositoryError, TranscriptionFilter, TranscriptionQuery,
    TranscriptionRepository,
};
use medscribe::domain::{
    LexiconSource, StoragePath, Transcription, TranscriptionId, TranscriptionStatus,
};
use medscribe::infrastructure::persistence::{MockLexiconRepository, MockTranscriptionRepository};

fn record(path: &str, minutes_ago: i64) -> Transcription {
    let mut t = Transcription::pending(TranscriptionId::new(), StoragePath::from_raw(path));
    t.created_at -= chrono::Duration::minutes(minutes_ago);
    t
}

#[tokio::test]
async fn given_records_when_listing_then_newest_first_with_total() {
    let repo = MockTranscriptionRepository::with_rows(vec![
        record("2024/01/01/old.wav", 30),
        record("2024/01/01/new.wav", 1),
        record("2024/01/01/mid.wav", 10),
    ]);

    let page = repo
        .list(&TranscriptionQuery::new(Some(0), Some(2), TranscriptionFilter::default()))
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].audio_file_path.as_str(), "2024/01/01/new.wav");
    assert_eq!(page.items[1].audio_file_path.as_str(), "2024/01/01/mid.wav");
}

#[tokio::test]
async fn given_path_filter_when_listing_then_case_insensitive_substring_match() {
    let repo = MockTranscriptionRepository::with_rows(vec![
        record("2024/01/01/Cardio.wav", 1),
        record("2024/01/01/derm.wav", 2),
    ]);
    let filter = TranscriptionFilter {
        audio_path: Some("cardio".to_string()),
        ..TranscriptionFilter::default()
    };

    let page = repo
        .list(&TranscriptionQuery::new(None, None, filter))
        .await
        .unwrap();

    assert_eq!(page.total, 1);
}

#[test]
fn given_out_of_range_paging_when_building_query_then_clamped() {
    let query = TranscriptionQuery::new(Some(-5), Some(1000), TranscriptionFilter::default());
    assert_eq!(query.offset, 0);
    assert_eq!(query.limit, 100);

    let query = TranscriptionQuery::new(None, Some(0), TranscriptionFilter::default());
    assert_eq!(query.limit, 1);
}

#[tokio::test]
async fn given_unknown_record_when_updating_then_not_found() {
    let repo = MockTranscriptionRepository::new();
    let mut t = record("a.wav", 0);
    t.fail("x");

    let result = repo.update(&t).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    assert_eq!(t.status, TranscriptionStatus::Failed);
}

#[tokio::test]
async fn given_existing_term_and_source_when_upserting_then_correction_replaced() {
    let repo = MockLexiconRepository::new();

    let first = repo
        .upsert("metaformin", "metformin", LexiconSource::Fda)
        .await
        .unwrap();
    let second = repo
        .upsert("metaformin", "Metformin", LexiconSource::Fda)
        .await
        .unwrap();
    let other_source = repo
        .upsert("metaformin", "metformin", LexiconSource::UserFeedback)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.correction, "Metformin");
    assert_ne!(first.id, other_source.id);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}
