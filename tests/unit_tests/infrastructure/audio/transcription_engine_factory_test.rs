use medscribe::application::ports::{TranscriptionEngine, TranscriptionOptions, TranscriptionRequest};
use medscribe::domain::AudioFormat;
use medscribe::infrastructure::audio::{
    TranscriptionEngineFactory, TranscriptionEngineFactoryError,
};
use medscribe::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

fn settings(provider: TranscriptionProviderSetting) -> TranscriptionSettings {
    TranscriptionSettings {
        provider,
        ..TranscriptionSettings::default()
    }
}

#[test]
fn given_openai_without_key_when_creating_then_missing_api_key() {
    let result = TranscriptionEngineFactory::create(&settings(TranscriptionProviderSetting::OpenAi));

    assert!(matches!(
        result,
        Err(TranscriptionEngineFactoryError::MissingApiKey("OpenAI"))
    ));
}

#[test]
fn given_openai_with_key_when_creating_then_engine_built() {
    let settings = TranscriptionSettings {
        api_key: Some("sk-test".to_string()),
        ..settings(TranscriptionProviderSetting::OpenAi)
    };

    assert!(TranscriptionEngineFactory::create(&settings).is_ok());
}

#[test]
fn given_azure_without_deployment_when_creating_then_missing_setting() {
    let settings = TranscriptionSettings {
        api_key: Some("azure-key".to_string()),
        azure_endpoint: Some("https://example.openai.azure.com".to_string()),
        ..settings(TranscriptionProviderSetting::Azure)
    };

    assert!(matches!(
        TranscriptionEngineFactory::create(&settings),
        Err(TranscriptionEngineFactoryError::MissingSetting(
            "transcription.azure_deployment"
        ))
    ));
}

#[tokio::test]
async fn given_mock_provider_when_creating_then_engine_echoes_language() {
    let engine =
        TranscriptionEngineFactory::create(&settings(TranscriptionProviderSetting::Mock)).unwrap();
    let request = TranscriptionRequest {
        audio: bytes::Bytes::from_static(b"x"),
        filename: "a.wav".to_string(),
        format: AudioFormat::Wav,
        options: TranscriptionOptions {
            language: Some("fa".to_string()),
            ..TranscriptionOptions::default()
        },
    };

    let transcript = engine.transcribe(&request).await.unwrap();

    assert_eq!(transcript.text, "Mock transcript");
    assert_eq!(transcript.language.as_deref(), Some("fa"));
}
