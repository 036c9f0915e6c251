use bytes::Bytes;

use medscribe::application::ports::{
    ResponseFormat, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
    TranscriptionRequest,
};
use medscribe::domain::AudioFormat;
use medscribe::infrastructure::audio::AzureWhisperEngine;

use super::mock_server;

const ROUTE: &str = "/openai/deployments/my-deployment/audio/transcriptions";

fn request() -> TranscriptionRequest {
    TranscriptionRequest {
        audio: Bytes::from_static(b"fake audio"),
        filename: "sample.mp3".to_string(),
        format: AudioFormat::Mp3,
        options: TranscriptionOptions {
            response_format: ResponseFormat::Json,
            ..TranscriptionOptions::default()
        },
    }
}

fn engine(base_url: &str) -> AzureWhisperEngine {
    AzureWhisperEngine::new(base_url, "my-deployment", "test-key", "2024-06-01", None)
}

#[tokio::test]
async fn given_json_response_when_azure_transcribes_then_returns_text() {
    let server = mock_server::start_requiring_header(
        ROUTE,
        "api-key",
        "test-key",
        r#"{"text": "Hello from Azure Whisper"}"#,
    )
    .await;

    let transcript = engine(&server.base_url).transcribe(&request()).await.unwrap();

    assert_eq!(transcript.text, "Hello from Azure Whisper");
}

#[tokio::test]
async fn given_trailing_slash_in_endpoint_when_azure_transcribes_then_route_still_matches() {
    let server = mock_server::start(ROUTE, 200, r#"{"text": "ok"}"#).await;

    let transcript = engine(&format!("{}/", server.base_url))
        .transcribe(&request())
        .await
        .unwrap();

    assert_eq!(transcript.text, "ok");
}

#[tokio::test]
async fn given_invalid_request_status_when_azure_transcribes_then_invalid_request_error() {
    let body = r#"{"error": {"code": "InvalidRequest", "message": "bad audio"}}"#;
    let server = mock_server::start(ROUTE, 400, body).await;

    let error = engine(&server.base_url)
        .transcribe(&request())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        TranscriptionError::InvalidRequest("status 400: bad audio".to_string())
    );
}

#[tokio::test]
async fn given_throttled_when_azure_transcribes_then_rate_limited() {
    let server = mock_server::start(ROUTE, 429, "Too Many Requests").await;

    let error = engine(&server.base_url)
        .transcribe(&request())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        TranscriptionError::RateLimited("status 429: Too Many Requests".to_string())
    );
}
