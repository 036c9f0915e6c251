use crate::application::retry::{ClassifyFailure, FailureClass};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ClassifyFailure for RepositoryError {
    fn kind(&self) -> &'static str {
        match self {
            RepositoryError::ConnectionFailed(_) => "ConnectionFailed",
            RepositoryError::QueryFailed(_) => "QueryFailed",
            RepositoryError::NotFound(_) => "NotFound",
            RepositoryError::ConstraintViolation(_) => "ConstraintViolation",
        }
    }

    fn declared_class(&self) -> Option<FailureClass> {
        match self {
            RepositoryError::ConnectionFailed(_) => Some(FailureClass::Transient),
            RepositoryError::NotFound(_) | RepositoryError::ConstraintViolation(_) => {
                Some(FailureClass::Permanent)
            }
            RepositoryError::QueryFailed(_) => None,
        }
    }
}
