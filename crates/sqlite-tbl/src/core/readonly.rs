use rusqlite::Statement;

use crate::error::{AppError, AppResult};

/// Rejects statements that would modify the database file.
pub fn ensure_readonly(stmt: &Statement<'_>) -> AppResult<()> {
    if stmt.readonly() {
        Ok(())
    } else {
        Err(AppError::NotReadonly)
    }
}
