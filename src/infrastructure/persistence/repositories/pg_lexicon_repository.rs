use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::application::ports::{LexiconRepository, RepositoryError};
use crate::domain::{LexiconEntry, LexiconSource};

use super::sqlx_error::map_sqlx_error;

#[derive(FromRow)]
struct LexiconRow {
    id: i64,
    term: String,
    correction: String,
    frequency: i64,
    source: String,
}

impl TryFrom<LexiconRow> for LexiconEntry {
    type Error = RepositoryError;

    fn try_from(r: LexiconRow) -> Result<Self, Self::Error> {
        let source = r
            .source
            .parse::<LexiconSource>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(LexiconEntry {
            id: r.id,
            term: r.term,
            correction: r.correction,
            frequency: r.frequency,
            source,
        })
    }
}

pub struct PgLexiconRepository {
    pool: PgPool,
}

impl PgLexiconRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LexiconRepository for PgLexiconRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<LexiconEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, LexiconRow>(
            r#"
            SELECT id, term, correction, frequency, source
            FROM lexicon
            ORDER BY term
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(LexiconEntry::try_from).collect()
    }

    #[instrument(skip(self, correction), fields(source = %source))]
    async fn upsert(
        &self,
        term: &str,
        correction: &str,
        source: LexiconSource,
    ) -> Result<LexiconEntry, RepositoryError> {
        let row = sqlx::query_as::<_, LexiconRow>(
            r#"
            INSERT INTO lexicon (term, correction, frequency, source)
            VALUES ($1, $2, 0, $3)
            ON CONFLICT (term, source) DO UPDATE SET correction = EXCLUDED.correction
            RETURNING id, term, correction, frequency, source
            "#,
        )
        .bind(term)
        .bind(correction)
        .bind(source.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        LexiconEntry::try_from(row)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn record_hits(&self, ids: &[i64]) -> Result<(), RepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }

        sqlx::query("UPDATE lexicon SET frequency = frequency + 1 WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
