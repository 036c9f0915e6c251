use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    EngineTranscript, TranscriptionEngine, TranscriptionError, TranscriptionRequest,
};

use super::whisper_http::{build_form, map_transport_error, read_response};

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-06-01";

/// Whisper served from an Azure OpenAI deployment. The deployment fixes the
/// model, so per-request model overrides are ignored.
pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureWhisperEngine {
    pub fn new(
        base_url: &str,
        deployment: &str,
        api_key: &str,
        api_version: &str,
        timeout: Option<Duration>,
    ) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_else(|_| reqwest::Client::new()),
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let form = build_form(request, None)?;

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to Azure OpenAI Whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let transcript = read_response(response, request.options.response_format).await?;

        tracing::info!(
            chars = transcript.text.chars().count(),
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}
