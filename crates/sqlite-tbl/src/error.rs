use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::ColumnType;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to open database: {path}: {source}")]
    DbOpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{source}: '{sql}'")]
    PrepareFailed {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("sql error: {0}")]
    SqlError(String),

    #[error("query is not read-only")]
    NotReadonly,

    #[error("column '{column}': cannot render {kind} values")]
    UnsupportedColumnType { column: String, kind: ColumnType },

    #[error("failed to finalize statement: {0}")]
    FinalizeFailed(#[source] rusqlite::Error),

    #[error("failed to close database: {path}: {source}")]
    DbCloseFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::SqlError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
