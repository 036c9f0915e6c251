use crate::application::ports::RepositoryError;

/// Maps sqlx failures onto the repository taxonomy. Pool and IO failures are
/// connection failures, so callers may retry them.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}
