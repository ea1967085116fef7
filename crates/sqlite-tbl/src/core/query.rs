use std::io::Write;

use rusqlite::Connection;

use crate::core::{readonly, source::SqliteRowSource};
use crate::error::{AppError, AppResult};
use crate::render::report::TableReport;

/// Runs `sql` and feeds every row to `report`.
///
/// The statement is finalized before returning, whether or not rendering
/// succeeded. A rendering error takes precedence over a finalize error.
pub fn run_report<W: Write>(
    conn: &Connection,
    sql: &str,
    report: &mut TableReport<W>,
) -> AppResult<usize> {
    let mut stmt = conn.prepare(sql).map_err(|source| AppError::PrepareFailed {
        sql: sql.to_string(),
        source,
    })?;
    readonly::ensure_readonly(&stmt)?;

    let rendered = match SqliteRowSource::new(&mut stmt) {
        Ok(mut source) => report.render_rows(&mut source),
        Err(e) => Err(e),
    };
    let finalized = stmt.finalize().map_err(AppError::FinalizeFailed);

    let rows = rendered?;
    finalized?;
    tracing::debug!(rows, "query finished");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::preamble::FormatDescriptor;
    use crate::render::report::LineWidth;
    use crate::render::row::RowRenderer;

    fn db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (id INTEGER, name TEXT, note TEXT, pic BLOB);
             INSERT INTO people VALUES (1, 'Alice', NULL, NULL);
             INSERT INTO people VALUES (2, 'Bob', 'tall', x'00ff');",
        )
        .unwrap();
        conn
    }

    fn report() -> TableReport<Vec<u8>> {
        TableReport::new(
            Vec::new(),
            RowRenderer::default(),
            FormatDescriptor::parse("box"),
            LineWidth::default(),
        )
    }

    #[test]
    fn test_renders_rows_from_sqlite() {
        let conn = db();
        let mut r = report();
        let n = run_report(
            &conn,
            "SELECT id, name, note FROM people ORDER BY id",
            &mut r,
        )
        .unwrap();
        assert_eq!(n, 2);

        let out = String::from_utf8(r.finish().unwrap()).unwrap();
        assert!(out.contains("box;\nLBLBLB\nN L L .\n"));
        assert!(out.contains("1\tT{\nAlice\nT}\tNULL\n"));
        assert!(out.contains("2\tT{\nBob\nT}\tT{\ntall\nT}\n"));
    }

    #[test]
    fn test_empty_result_has_no_preamble() {
        let conn = db();
        let mut r = report();
        let n = run_report(&conn, "SELECT id FROM people WHERE id > 10", &mut r).unwrap();
        assert_eq!(n, 0);
        let out = String::from_utf8(r.finish().unwrap()).unwrap();
        assert!(!out.contains("box;"));
    }

    #[test]
    fn test_malformed_query_reports_sql() {
        let conn = db();
        let mut r = report();
        let err = run_report(&conn, "SELEC nonsense", &mut r).unwrap_err();
        assert!(matches!(err, AppError::PrepareFailed { .. }));
        assert!(err.to_string().ends_with("'SELEC nonsense'"));
    }

    #[test]
    fn test_write_statement_is_rejected() {
        let conn = db();
        let mut r = report();
        let err = run_report(&conn, "DELETE FROM people", &mut r).unwrap_err();
        assert!(matches!(err, AppError::NotReadonly));
        let count: i64 = conn
            .query_row("SELECT count(*) FROM people", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_blob_column_aborts() {
        let conn = db();
        let mut r = report();
        let err = run_report(&conn, "SELECT pic FROM people WHERE id = 2", &mut r).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedColumnType { .. }));
    }
}
