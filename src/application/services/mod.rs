mod lexicon_corrector;
mod transcript_normalizer;
mod transcription_invoker;
mod transcription_service;

pub use lexicon_corrector::{CorrectedText, LexiconCorrector};
pub use transcript_normalizer::normalize_transcript;
pub use transcription_invoker::{ErrorCategory, InvokeError, TranscriptionInvoker};
pub use transcription_service::{
    AudioUpload, DEFAULT_MAX_UPLOAD_BYTES, TranscriptionService, TranscriptionServiceError,
};
