mod audio_store;
mod lexicon_repository;
mod repository_error;
mod transcription_engine;
mod transcription_repository;

pub use audio_store::{AudioStore, AudioStoreError};
pub use lexicon_repository::LexiconRepository;
pub use repository_error::RepositoryError;
pub use transcription_engine::{
    DEFAULT_MODEL, EngineTranscript, ResponseFormat, TranscriptionEngine, TranscriptionError,
    TranscriptionOptions, TranscriptionRequest,
};
pub use transcription_repository::{
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, TranscriptionFilter, TranscriptionPage,
    TranscriptionQuery, TranscriptionRepository,
};
