mod mock_repository;
mod pg_lexicon_repository;
mod pg_transcription_repository;
mod sqlx_error;

pub use mock_repository::{MockLexiconRepository, MockTranscriptionRepository};
pub use pg_lexicon_repository::PgLexiconRepository;
pub use pg_transcription_repository::PgTranscriptionRepository;
pub use sqlx_error::map_sqlx_error;
