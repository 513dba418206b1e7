// src/error/types.rs
use crate::mapping::{CodecError, MetadataError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Driver-level failure, wrapped and surfaced, never swallowed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    /// Misconfigured entity descriptor. Programmer error, fatal at
    /// startup of the affected feature.
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// A filter or sort key referenced a field the entity does not have.
    #[error("Unknown field `{field}` on `{table}`")]
    UnknownField { table: String, field: String },

    /// A write affected zero rows or produced no generated key.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
