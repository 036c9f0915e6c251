use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use medscribe::application::ports::{
    EngineTranscript, ResponseFormat, TranscriptionError, TranscriptionOptions,
};
use medscribe::application::retry::{RecordingSleeper, RetryController, RetryPolicy, StopReason};
use medscribe::application::services::{ErrorCategory, InvokeError, TranscriptionInvoker};
use medscribe::domain::AudioFormat;

use crate::helpers::{ScriptedEngine, write_audio_file};

fn invoker(engine: Arc<ScriptedEngine>) -> (TranscriptionInvoker, RecordingSleeper) {
    let sleeper = RecordingSleeper::new();
    let retry = RetryController::with_sleeper(RetryPolicy::default(), Arc::new(sleeper.clone()));
    (TranscriptionInvoker::new(engine, retry), sleeper)
}

#[tokio::test]
async fn given_existing_wav_when_transcribing_then_returns_engine_text() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "sample.wav");
    let engine = Arc::new(ScriptedEngine::succeeding("Patient reports mild headache"));
    let (invoker, sleeper) = invoker(Arc::clone(&engine));

    let text = invoker
        .transcribe(&audio, &TranscriptionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "Patient reports mild headache");
    assert_eq!(engine.calls(), 1);
    assert!(sleeper.waits().is_empty());
}

#[tokio::test]
async fn given_options_when_transcribing_then_forwards_them_with_file_bytes() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "visit.mp3");
    let engine = Arc::new(ScriptedEngine::succeeding("ok"));
    let (invoker, _) = invoker(Arc::clone(&engine));
    let options = TranscriptionOptions {
        language: Some("fa".to_string()),
        prompt: Some("cardiology consult".to_string()),
        response_format: ResponseFormat::VerboseJson,
        model: Some("whisper-1".to_string()),
        temperature: 0.2,
    };

    invoker.transcribe(&audio, &options).await.unwrap();

    let request = engine.last_request().unwrap();
    assert_eq!(request.filename, "visit.mp3");
    assert_eq!(request.format, AudioFormat::Mp3);
    assert_eq!(request.options, options);
    assert_eq!(request.audio.as_ref(), std::fs::read(&audio).unwrap().as_slice());
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_engine_is_never_called() {
    let engine = Arc::new(ScriptedEngine::succeeding("unused"));
    let (invoker, sleeper) = invoker(Arc::clone(&engine));
    let missing = PathBuf::from("/definitely/not/here/recording.wav");

    let error = invoker
        .transcribe(&missing, &TranscriptionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, InvokeError::AudioNotFound(_)));
    assert_eq!(error.category(), ErrorCategory::LocalPrecondition);
    assert_eq!(error.attempts_made(), 0);
    assert_eq!(engine.calls(), 0);
    assert!(sleeper.waits().is_empty());
}

#[tokio::test]
async fn given_directory_instead_of_file_when_transcribing_then_audio_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::succeeding("unused"));
    let (invoker, _) = invoker(Arc::clone(&engine));

    let error = invoker
        .transcribe(dir.path(), &TranscriptionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, InvokeError::AudioNotFound(_)));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_unsupported_extension_when_transcribing_then_rejected_locally() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "notes.ogg");
    let engine = Arc::new(ScriptedEngine::succeeding("unused"));
    let (invoker, _) = invoker(Arc::clone(&engine));

    let error = invoker
        .transcribe(&audio, &TranscriptionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, InvokeError::UnsupportedFormat(_)));
    assert_eq!(error.category(), ErrorCategory::LocalPrecondition);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_rate_limited_twice_when_transcribing_then_succeeds_on_third_attempt() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "sample.wav");
    let engine = Arc::new(ScriptedEngine::new(vec![
        Err(TranscriptionError::RateLimited("Error 429: rate limit hit".into())),
        Err(TranscriptionError::RateLimited("Error 429: rate limit hit".into())),
        Ok(EngineTranscript::text_only("third time lucky")),
    ]));
    let (invoker, sleeper) = invoker(Arc::clone(&engine));

    let text = invoker
        .transcribe(&audio, &TranscriptionOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "third time lucky");
    assert_eq!(engine.calls(), 3);
    assert_eq!(
        sleeper.waits(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn given_authentication_failure_when_transcribing_then_fails_once_as_permanent() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "sample.wav");
    let engine = Arc::new(ScriptedEngine::new(vec![Err(
        TranscriptionError::Authentication("401 unauthorized".into()),
    )]));
    let (invoker, sleeper) = invoker(Arc::clone(&engine));

    let error = invoker
        .transcribe(&audio, &TranscriptionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(engine.calls(), 1);
    assert_eq!(error.category(), ErrorCategory::PermanentRemote);
    assert_eq!(error.kind(), "Authentication");
    assert_eq!(error.stop_reason(), Some(StopReason::Permanent));
    assert_eq!(error.subject(), audio.display().to_string());
    assert!(sleeper.waits().is_empty());
}

#[tokio::test]
async fn given_timeouts_on_every_attempt_when_transcribing_then_gives_up_after_three() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_audio_file(dir.path(), "sample.m4a");
    let engine = Arc::new(ScriptedEngine::new(vec![
        Err(TranscriptionError::Timeout("timeout".into())),
        Err(TranscriptionError::Timeout("timeout".into())),
        Err(TranscriptionError::Timeout("timeout".into())),
    ]));
    let (invoker, sleeper) = invoker(Arc::clone(&engine));

    let error = invoker
        .transcribe(&audio, &TranscriptionOptions::default())
        .await
        .unwrap_err();

    assert_eq!(engine.calls(), 3);
    assert_eq!(error.category(), ErrorCategory::TransientRemote);
    assert_eq!(error.kind(), "Timeout");
    assert_eq!(error.attempts_made(), 3);
    assert_eq!(error.stop_reason(), Some(StopReason::Exhausted));
    assert_eq!(
        error.remote_error(),
        Some(&TranscriptionError::Timeout("timeout".into()))
    );
    assert_eq!(
        sleeper.waits(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn given_default_policy_constructor_when_inspected_then_uses_default_budget() {
    let engine = Arc::new(ScriptedEngine::succeeding("x"));
    let invoker = TranscriptionInvoker::with_default_policy(engine);

    assert_eq!(invoker.retry_policy(), &RetryPolicy::default());
}
