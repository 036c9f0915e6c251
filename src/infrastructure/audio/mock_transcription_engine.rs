use async_trait::async_trait;

use crate::application::ports::{
    EngineTranscript, TranscriptionEngine, TranscriptionError, TranscriptionRequest,
};

pub struct MockTranscriptionEngine {
    text: String,
}

impl MockTranscriptionEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for MockTranscriptionEngine {
    fn default() -> Self {
        Self::new("Mock transcript")
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        Ok(EngineTranscript {
            text: self.text.clone(),
            language: request.options.language.clone(),
            duration_seconds: None,
        })
    }
}
