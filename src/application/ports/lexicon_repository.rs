use async_trait::async_trait;

use crate::domain::{LexiconEntry, LexiconSource};

use super::RepositoryError;

#[async_trait]
pub trait LexiconRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<LexiconEntry>, RepositoryError>;

    /// Inserts a term or replaces the correction of an existing `(term, source)` pair.
    async fn upsert(
        &self,
        term: &str,
        correction: &str,
        source: LexiconSource,
    ) -> Result<LexiconEntry, RepositoryError>;

    async fn record_hits(&self, ids: &[i64]) -> Result<(), RepositoryError>;
}
