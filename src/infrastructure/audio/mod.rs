mod azure_whisper_engine;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod whisper_http;

pub use azure_whisper_engine::{AzureWhisperEngine, DEFAULT_AZURE_API_VERSION};
pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_whisper_engine::{DEFAULT_OPENAI_BASE_URL, OpenAiWhisperEngine};
pub use transcription_engine_factory::{
    TranscriptionEngineFactory, TranscriptionEngineFactoryError,
};
