use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Limit must be positive, got {0}")]
    InvalidLimit(i64),

    #[error("{0} requires at least one column")]
    EmptyRow(&'static str),

    #[error("Refusing to update without conditions")]
    UnconditionedUpdate,
}
