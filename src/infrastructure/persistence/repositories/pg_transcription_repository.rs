use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{
    RepositoryError, TranscriptionFilter, TranscriptionPage, TranscriptionQuery,
    TranscriptionRepository,
};
use crate::domain::{StoragePath, Transcription, TranscriptionId, TranscriptionStatus};

use super::sqlx_error::map_sqlx_error;

const SELECT_COLUMNS: &str = "SELECT id, audio_file_path, transcription_text, language_detected, \
     duration, status, error_message, created_at, updated_at FROM transcriptions";

#[derive(FromRow)]
struct TranscriptionRow {
    id: Uuid,
    audio_file_path: String,
    transcription_text: Option<String>,
    language_detected: Option<String>,
    duration: Option<f64>,
    status: String,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TranscriptionRow> for Transcription {
    type Error = RepositoryError;

    fn try_from(r: TranscriptionRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<TranscriptionStatus>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(Transcription {
            id: TranscriptionId::from_uuid(r.id),
            audio_file_path: StoragePath::from_raw(r.audio_file_path),
            text: r.transcription_text,
            language: r.language_detected,
            duration_seconds: r.duration,
            status,
            error_message: r.error_message,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PgTranscriptionRepository {
    pool: PgPool,
}

impl PgTranscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &TranscriptionFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(language) = &filter.language {
        builder
            .push(" AND language_detected = ")
            .push_bind(language.clone());
    }
    if let Some(path) = &filter.audio_path {
        builder
            .push(" AND audio_file_path ILIKE ")
            .push_bind(format!("%{}%", path));
    }
}

#[async_trait]
impl TranscriptionRepository for PgTranscriptionRepository {
    #[instrument(skip(self, transcription), fields(transcription_id = %transcription.id.as_uuid()))]
    async fn create(&self, transcription: &Transcription) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO transcriptions
                (id, audio_file_path, transcription_text, language_detected, duration,
                 status, error_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(transcription.id.as_uuid())
        .bind(transcription.audio_file_path.as_str())
        .bind(&transcription.text)
        .bind(&transcription.language)
        .bind(transcription.duration_seconds)
        .bind(transcription.status.as_str())
        .bind(&transcription.error_message)
        .bind(transcription.created_at)
        .bind(transcription.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(transcription_id = %id.as_uuid()))]
    async fn get_by_id(
        &self,
        id: TranscriptionId,
    ) -> Result<Option<Transcription>, RepositoryError> {
        let row = sqlx::query_as::<_, TranscriptionRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Transcription::try_from).transpose()
    }

    #[instrument(skip(self, transcription), fields(transcription_id = %transcription.id.as_uuid(), status = %transcription.status))]
    async fn update(&self, transcription: &Transcription) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE transcriptions
            SET transcription_text = $1, language_detected = $2, duration = $3,
                status = $4, error_message = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&transcription.text)
        .bind(&transcription.language)
        .bind(transcription.duration_seconds)
        .bind(transcription.status.as_str())
        .bind(&transcription.error_message)
        .bind(transcription.updated_at)
        .bind(transcription.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(
                transcription.id.as_uuid().to_string(),
            ));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(transcription_id = %id.as_uuid()))]
    async fn delete(&self, id: TranscriptionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM transcriptions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(offset = query.offset, limit = query.limit))]
    async fn list(&self, query: &TranscriptionQuery) -> Result<TranscriptionPage, RepositoryError> {
        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transcriptions");
        push_filters(&mut count_builder, &query.filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut builder, &query.filter);
        builder
            .push(" ORDER BY created_at DESC OFFSET ")
            .push_bind(query.offset)
            .push(" LIMIT ")
            .push_bind(query.limit);

        let rows = builder
            .build_query_as::<TranscriptionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let items = rows
            .into_iter()
            .map(Transcription::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(returned = items.len(), total, "Listed transcriptions");

        Ok(TranscriptionPage {
            items,
            total,
            offset: query.offset,
            limit: query.limit,
        })
    }
}
