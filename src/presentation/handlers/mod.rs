mod error;
mod health;
mod lexicon;
mod transcribe;
mod transcriptions;

pub use error::{ApiError, ErrorBody, ErrorEnvelope};
pub use health::{SERVICE_NAME, SERVICE_VERSION, health_handler, root_handler};
pub use lexicon::{list_lexicon_handler, upsert_lexicon_handler};
pub use transcribe::transcribe_handler;
pub use transcriptions::{
    delete_transcription_handler, get_transcription_handler, list_transcriptions_handler,
};
