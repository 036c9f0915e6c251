use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    DEFAULT_MODEL, EngineTranscript, TranscriptionEngine, TranscriptionError,
    TranscriptionRequest,
};

use super::whisper_http::{build_form, map_transport_error, read_response};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_else(|_| reqwest::Client::new()),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let model = request.options.model.as_deref().unwrap_or(&self.model);
        let form = build_form(request, Some(model))?;

        tracing::debug!(
            model = %model,
            filename = %request.filename,
            "Sending audio to OpenAI Whisper API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let transcript = read_response(response, request.options.response_format).await?;

        tracing::info!(
            chars = transcript.text.chars().count(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}
