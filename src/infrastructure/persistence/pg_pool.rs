use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, instrument};

use crate::application::ports::RepositoryError;
use crate::application::retry::{RetryContext, RetryController, RetryPolicy};

pub const CONNECT_ATTEMPTS: u32 = 6;
pub const CONNECT_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Connects to PostgreSQL, treating connection failures as transient.
#[instrument(skip(url, retry))]
pub async fn create_pool(
    url: &str,
    max_connections: u32,
    retry: &RetryController,
) -> Result<PgPool, RepositoryError> {
    let context = RetryContext::new("connect_postgres");

    let pool = retry
        .execute(&context, move || async move {
            PgPoolOptions::new()
                .max_connections(max_connections)
                .connect(url)
                .await
                .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
        })
        .await
        .map_err(|failure| failure.into_error())?
        .into_value();

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Backoff used at startup: 500ms doubling, six attempts.
pub fn connect_policy() -> RetryPolicy {
    RetryPolicy::exponential(CONNECT_ATTEMPTS, CONNECT_INITIAL_DELAY)
        .unwrap_or_else(|_| RetryPolicy::default())
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(format!("migrations: {}", e)))?;
    info!("Database migrations applied");
    Ok(())
}
