use std::{path::Path, time::Duration};

use rusqlite::{Connection, OpenFlags};

use crate::error::{AppError, AppResult};

const BUSY_TIMEOUT_MS: u64 = 2_000;

pub fn open_readonly(path: &Path) -> AppResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(|source| AppError::DbOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let _ = conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS));
    tracing::debug!(path = %path.display(), "opened database read-only");
    Ok(conn)
}

pub fn close(conn: Connection, path: &Path) -> AppResult<()> {
    conn.close().map_err(|(_, source)| AppError::DbCloseFailed {
        path: path.to_path_buf(),
        source,
    })
}
