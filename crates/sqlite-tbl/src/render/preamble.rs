use std::io::Write;

use crate::core::source::RowSource;
use crate::error::AppResult;

use super::layout::{heading_line, is_box, layout_line};
use super::row::{frame_text, CELL_SEPARATOR};

/// Splits a literal preamble into table options and layout.
pub const PREAMBLE_DELIMITER: char = ';';

/// How the table options, layout and headers are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatDescriptor {
    /// Caller supplied `options;layout`; emitted as given, no headers.
    Literal { options: String, layout: String },
    /// Table options derived from keywords; layout inferred from the first row.
    Keywords { options: String, boxed: bool },
}

impl FormatDescriptor {
    pub fn parse(format: &str) -> Self {
        match format.split_once(PREAMBLE_DELIMITER) {
            Some((options, layout)) => FormatDescriptor::Literal {
                options: options.to_string(),
                layout: layout.to_string(),
            },
            None => FormatDescriptor::Keywords {
                options: format.to_string(),
                boxed: is_box(format),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreambleState {
    NotYetEmitted,
    Emitted,
}

/// Writes the table preamble once, ahead of the first record.
#[derive(Debug)]
pub struct Preamble {
    descriptor: FormatDescriptor,
    state: PreambleState,
}

impl Preamble {
    pub fn new(descriptor: FormatDescriptor) -> Self {
        Self {
            descriptor,
            state: PreambleState::NotYetEmitted,
        }
    }

    pub fn state(&self) -> PreambleState {
        self.state
    }

    /// Emits the preamble for the source's current row if it has not fired yet.
    pub fn emit_once<W: Write>(&mut self, out: &mut W, source: &dyn RowSource) -> AppResult<()> {
        if self.state == PreambleState::Emitted {
            return Ok(());
        }
        match &self.descriptor {
            FormatDescriptor::Literal { options, layout } => {
                writeln!(out, "{options}{PREAMBLE_DELIMITER}")?;
                writeln!(out, "{layout}")?;
            }
            FormatDescriptor::Keywords { options, boxed } => {
                let ncol = source.column_count();
                let types: Vec<_> = (0..ncol).map(|i| source.column_type(i)).collect();
                writeln!(out, "{options}{PREAMBLE_DELIMITER}")?;
                writeln!(out, "{}", heading_line(ncol))?;
                writeln!(out, "{}", layout_line(&types))?;

                let headers = (0..ncol)
                    .map(|i| frame_text(source.column_name(i)))
                    .collect::<Vec<_>>()
                    .join(CELL_SEPARATOR);
                writeln!(out, "{headers}")?;
                if *boxed {
                    writeln!(out, "_")?;
                }
            }
        }
        tracing::debug!(descriptor = ?self.descriptor, "table preamble emitted");
        self.state = PreambleState::Emitted;
        Ok(())
    }
}
