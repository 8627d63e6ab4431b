use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Unknown form type: {0}")]
    UnknownFormType(String),
    #[error("Field '{field}' is not part of form '{form_type}'")]
    UnknownField { form_type: String, field: String },
    #[error("Duplicate form type: {0}")]
    DuplicateFormType(String),
    #[error("No form types registered")]
    EmptyRegistry,
    #[error("Duplicate field '{field}' in form '{form_type}'")]
    DuplicateField { form_type: String, field: String },
    #[error("Dropdown field '{0}' has no options")]
    MissingOptions(String),
    #[error("Ledger index {index} out of range (ledger has {len} entries)")]
    LedgerIndexOutOfRange { index: usize, len: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
