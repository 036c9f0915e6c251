mod audio_format;
mod lexicon_entry;
mod storage_path;
mod transcription;
mod transcription_status;

pub use audio_format::AudioFormat;
pub use lexicon_entry::{LexiconEntry, LexiconSource};
pub use storage_path::StoragePath;
pub use transcription::{Transcription, TranscriptionId};
pub use transcription_status::TranscriptionStatus;
