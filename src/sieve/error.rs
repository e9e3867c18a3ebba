use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Saved filter not found: {0}")]
    FilterNotFound(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Field '{0}' is not filterable")]
    UnknownField(String),

    #[error("No condition at position {0}")]
    ConditionOutOfRange(usize),

    #[error("Cannot save filter: {0}")]
    InvalidSave(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SieveError>;
