use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TranscriptionEngine;
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::{AzureWhisperEngine, DEFAULT_AZURE_API_VERSION};
use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionEngineFactoryError {
    #[error("missing API key: {0} transcription requires an api_key")]
    MissingApiKey(&'static str),
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionEngineFactoryError> {
        let timeout = Some(Duration::from_secs(settings.request_timeout_secs));

        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(TranscriptionEngineFactoryError::MissingApiKey("OpenAI"))?;
                tracing::info!(model = %settings.model, "Using OpenAI Whisper transcription");
                Ok(Arc::new(OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    timeout,
                )))
            }
            TranscriptionProviderSetting::Azure => {
                let key = settings
                    .api_key
                    .as_deref()
                    .filter(|k| !k.is_empty())
                    .ok_or(TranscriptionEngineFactoryError::MissingApiKey("Azure"))?;
                let endpoint = settings.azure_endpoint.as_deref().ok_or(
                    TranscriptionEngineFactoryError::MissingSetting("transcription.azure_endpoint"),
                )?;
                let deployment = settings.azure_deployment.as_deref().ok_or(
                    TranscriptionEngineFactoryError::MissingSetting("transcription.azure_deployment"),
                )?;
                let api_version = settings
                    .azure_api_version
                    .as_deref()
                    .unwrap_or(DEFAULT_AZURE_API_VERSION);
                tracing::info!(deployment = %deployment, "Using Azure OpenAI Whisper transcription");
                Ok(Arc::new(AzureWhisperEngine::new(
                    endpoint,
                    deployment,
                    key,
                    api_version,
                    timeout,
                )))
            }
            TranscriptionProviderSetting::Mock => {
                tracing::warn!("Using mock transcription engine");
                Ok(Arc::new(MockTranscriptionEngine::default()))
            }
        }
    }
}
