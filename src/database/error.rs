use thiserror::Error;

use crate::filter::FilterError;

/// Errors raised by the store seams and their construction
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Data store is not configured")]
    Unconfigured,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}
