use crate::core::types::Cell;
use crate::error::{AppError, AppResult};

use super::registry::FormatRegistry;
use super::template::NumericTemplate;

pub const CELL_SEPARATOR: &str = "\t";
pub const NULL_TOKEN: &str = "NULL";

/// Wraps text in a tbl text block so tabs and newlines stay literal.
pub fn frame_text(text: &str) -> String {
    format!("T{{\n{text}\nT}}")
}

/// Formats one result row as a tbl data line.
#[derive(Debug, Clone)]
pub struct RowRenderer {
    registry: FormatRegistry,
    integer_default: NumericTemplate,
    float_default: NumericTemplate,
}

impl RowRenderer {
    pub fn new(
        registry: FormatRegistry,
        integer_default: NumericTemplate,
        float_default: NumericTemplate,
    ) -> Self {
        Self {
            registry,
            integer_default,
            float_default,
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn render_cell(&self, column: &str, cell: &Cell) -> AppResult<String> {
        Ok(match cell {
            Cell::Integer(v) => self
                .registry
                .lookup(column, &self.integer_default)
                .format_int(*v),
            Cell::Float(v) => self
                .registry
                .lookup(column, &self.float_default)
                .format_float(*v),
            Cell::Text(s) => frame_text(s),
            Cell::Null => NULL_TOKEN.to_string(),
            Cell::Blob(_) => {
                return Err(AppError::UnsupportedColumnType {
                    column: column.to_string(),
                    kind: cell.column_type(),
                });
            }
        })
    }

    /// Renders a whole record, newline included.
    pub fn render_record(&self, columns: &[String], cells: &[Cell]) -> AppResult<String> {
        let mut line = String::new();
        for (i, (column, cell)) in columns.iter().zip(cells).enumerate() {
            if i > 0 {
                line.push_str(CELL_SEPARATOR);
            }
            line.push_str(&self.render_cell(column, cell)?);
        }
        line.push('\n');
        Ok(line)
    }
}

impl Default for RowRenderer {
    fn default() -> Self {
        Self::new(
            FormatRegistry::new(),
            NumericTemplate::grouped_integer(),
            NumericTemplate::grouped_float(),
        )
    }
}
