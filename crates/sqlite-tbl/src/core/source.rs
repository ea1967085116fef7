use rusqlite::{Rows, Statement};

use crate::core::types::{Cell, ColumnType};
use crate::error::AppResult;

/// Forward-only cursor over a result set.
///
/// `advance` moves to the next row and reports whether one exists; the
/// accessors describe the current row. Column names are fixed for the
/// lifetime of the source.
pub trait RowSource {
    fn column_names(&self) -> &[String];

    fn current(&self) -> &[Cell];

    fn advance(&mut self) -> AppResult<bool>;

    fn column_count(&self) -> usize {
        self.column_names().len()
    }

    fn column_name(&self, i: usize) -> &str {
        &self.column_names()[i]
    }

    fn column_type(&self, i: usize) -> ColumnType {
        self.current()[i].column_type()
    }
}

pub struct SqliteRowSource<'stmt> {
    names: Vec<String>,
    rows: Rows<'stmt>,
    current: Vec<Cell>,
}

impl<'stmt> SqliteRowSource<'stmt> {
    pub fn new(stmt: &'stmt mut Statement<'_>) -> AppResult<Self> {
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let current = Vec::with_capacity(names.len());
        let rows = stmt.query([])?;
        Ok(Self {
            names,
            rows,
            current,
        })
    }
}

impl RowSource for SqliteRowSource<'_> {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    fn current(&self) -> &[Cell] {
        &self.current
    }

    fn advance(&mut self) -> AppResult<bool> {
        let Some(row) = self.rows.next()? else {
            self.current.clear();
            return Ok(false);
        };
        self.current.clear();
        for i in 0..self.names.len() {
            self.current.push(Cell::from(row.get_ref(i)?));
        }
        Ok(true)
    }
}

/// Rows held in memory, used to drive the renderer without a database.
#[cfg(test)]
pub struct MemoryRowSource {
    names: Vec<String>,
    rows: std::collections::VecDeque<Vec<Cell>>,
    current: Vec<Cell>,
}

#[cfg(test)]
impl MemoryRowSource {
    pub fn new(names: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            rows: rows.into(),
            current: Vec::new(),
        }
    }
}

#[cfg(test)]
impl RowSource for MemoryRowSource {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    fn current(&self) -> &[Cell] {
        &self.current
    }

    fn advance(&mut self) -> AppResult<bool> {
        match self.rows.pop_front() {
            Some(row) => {
                self.current = row;
                Ok(true)
            }
            None => {
                self.current.clear();
                Ok(false)
            }
        }
    }
}
