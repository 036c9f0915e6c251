use std::sync::Mutex;

use crate::application::ports::{
    LexiconRepository, RepositoryError, TranscriptionPage, TranscriptionQuery,
    TranscriptionRepository,
};
use crate::domain::{LexiconEntry, LexiconSource, Transcription, TranscriptionId};

fn poisoned() -> RepositoryError {
    RepositoryError::QueryFailed("mock repository lock poisoned".to_string())
}

/// In-memory stand-in for the transcriptions table.
#[derive(Default)]
pub struct MockTranscriptionRepository {
    rows: Mutex<Vec<Transcription>>,
}

impl MockTranscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Transcription>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait::async_trait]
impl TranscriptionRepository for MockTranscriptionRepository {
    async fn create(&self, transcription: &Transcription) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        if rows.iter().any(|r| r.id == transcription.id) {
            return Err(RepositoryError::ConstraintViolation(
                transcription.id.as_uuid().to_string(),
            ));
        }
        rows.push(transcription.clone());
        Ok(())
    }

    async fn get_by_id(
        &self,
        id: TranscriptionId,
    ) -> Result<Option<Transcription>, RepositoryError> {
        let rows = self.rows.lock().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, transcription: &Transcription) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|r| r.id == transcription.id) {
            Some(row) => {
                *row = transcription.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(
                transcription.id.as_uuid().to_string(),
            )),
        }
    }

    async fn delete(&self, id: TranscriptionId) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn list(&self, query: &TranscriptionQuery) -> Result<TranscriptionPage, RepositoryError> {
        let rows = self.rows.lock().map_err(|_| poisoned())?;
        let filter = &query.filter;
        let needle = filter.audio_path.as_ref().map(|p| p.to_lowercase());

        let mut matching: Vec<Transcription> = rows
            .iter()
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| {
                filter
                    .language
                    .as_ref()
                    .is_none_or(|l| r.language.as_ref() == Some(l))
            })
            .filter(|r| {
                needle
                    .as_ref()
                    .is_none_or(|n| r.audio_file_path.as_str().to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();

        Ok(TranscriptionPage {
            items,
            total,
            offset: query.offset,
            limit: query.limit,
        })
    }
}

/// In-memory stand-in for the lexicon table.
#[derive(Default)]
pub struct MockLexiconRepository {
    entries: Mutex<Vec<LexiconEntry>>,
}

impl MockLexiconRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LexiconEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait::async_trait]
impl LexiconRepository for MockLexiconRepository {
    async fn list(&self) -> Result<Vec<LexiconEntry>, RepositoryError> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.clone())
    }

    async fn upsert(
        &self,
        term: &str,
        correction: &str,
        source: LexiconSource,
    ) -> Result<LexiconEntry, RepositoryError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;

        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.term == term && e.source == source)
        {
            existing.correction = correction.to_string();
            return Ok(existing.clone());
        }

        let entry = LexiconEntry {
            id: entries.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            term: term.to_string(),
            correction: correction.to_string(),
            frequency: 0,
            source,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn record_hits(&self, ids: &[i64]) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        for entry in entries.iter_mut().filter(|e| ids.contains(&e.id)) {
            entry.frequency += 1;
        }
        Ok(())
    }
}
