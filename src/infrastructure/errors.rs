use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid schema file - {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
