use std::sync::Arc;

use crate::application::ports::LexiconRepository;
use crate::application::services::TranscriptionService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub lexicon_repository: Arc<dyn LexiconRepository>,
    pub settings: Arc<Settings>,
}
