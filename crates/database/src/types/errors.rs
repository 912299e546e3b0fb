//! Error types for the database layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    /// A stored value no longer maps onto its Rust enum.
    #[error("Invalid value {value:?} stored in column {column}")]
    InvalidValue { column: &'static str, value: String },
}
