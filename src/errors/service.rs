// Errors returned by application services

use super::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource looked up by id does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Repository refused the write (duplicate id, missing row on update).
    #[error("{0}")]
    NotSaved(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn rule(message: impl Into<String>) -> Self {
        ServiceError::Validation(ValidationError::rule(message))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
