use std::borrow::Cow;
use std::fmt;

use rusqlite::types::ValueRef;

/// Storage class of a single SQLite value.
///
/// SQLite types values, not columns, so the type is taken per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Blob,
    Null,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Null => "NULL",
        };
        f.write_str(name)
    }
}

/// One value of the current row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    Null,
}

impl Cell {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Cell::Integer(_) => ColumnType::Integer,
            Cell::Float(_) => ColumnType::Float,
            Cell::Text(_) => ColumnType::Text,
            Cell::Blob(_) => ColumnType::Blob,
            Cell::Null => ColumnType::Null,
        }
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(x) => Cell::Integer(x),
            ValueRef::Real(x) => Cell::Float(x),
            ValueRef::Text(t) => Cell::Text(text_lossy(t)),
            ValueRef::Blob(b) => Cell::Blob(b.to_vec()),
        }
    }
}

/// Decodes TEXT as UTF-8; invalid sequences become U+FFFD with a warning.
fn text_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            tracing::warn!(bytes = bytes.len(), "TEXT value is not valid UTF-8; replaced invalid sequences");
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_value_ref() {
        assert_eq!(Cell::from(ValueRef::Integer(7)), Cell::Integer(7));
        assert_eq!(Cell::from(ValueRef::Real(1.5)), Cell::Float(1.5));
        assert_eq!(Cell::from(ValueRef::Text(b"abc")), Cell::Text("abc".into()));
        assert_eq!(Cell::from(ValueRef::Null), Cell::Null);
        assert_eq!(Cell::from(ValueRef::Blob(&[1, 2])).column_type(), ColumnType::Blob);
    }

    #[test]
    fn test_invalid_utf8_text_is_replaced() {
        assert_eq!(
            Cell::from(ValueRef::Text(b"caf\xe9")),
            Cell::Text("caf\u{FFFD}".into())
        );
    }
}
