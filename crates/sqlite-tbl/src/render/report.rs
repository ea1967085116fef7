use std::io::Write;
use std::str::FromStr;

use crate::core::source::RowSource;
use crate::error::AppResult;

use super::preamble::{FormatDescriptor, Preamble};
use super::row::RowRenderer;

/// Widths below this are taken to be inches.
const INCH_THRESHOLD: f64 = 100.0;

const TABLE_START: &str = ".TS";
const TABLE_END: &str = ".TE";
/// Reports on stderr (via troff `.tm`) when the table outgrows the line.
const WIDTH_CHECK: &str =
    ".if (\\n(.l < \\n(TW) .tm line length \\n(.l less than table width \\n(TW";

/// The `-w` value, kept as typed so it is echoed back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct LineWidth {
    raw: String,
    value: f64,
}

impl LineWidth {
    /// `.ll` request that extends the line length by this width.
    pub fn directive(&self) -> String {
        let unit = if self.value < INCH_THRESHOLD { "i" } else { "" };
        format!(".ll +{}{unit}", self.raw)
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        Self {
            raw: "6.5".to_string(),
            value: 6.5,
        }
    }
}

impl FromStr for LineWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let value: f64 = raw
            .parse()
            .map_err(|_| format!("line width must be a number, got '{s}'"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(format!("line width must be a non-negative number, got '{s}'"));
        }
        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }
}

/// One tbl table: setup, preamble, records and trailer.
pub struct TableReport<W: Write> {
    out: W,
    renderer: RowRenderer,
    preamble: Preamble,
    line_width: LineWidth,
}

impl<W: Write> TableReport<W> {
    pub fn new(
        out: W,
        renderer: RowRenderer,
        descriptor: FormatDescriptor,
        line_width: LineWidth,
    ) -> Self {
        Self {
            out,
            renderer,
            preamble: Preamble::new(descriptor),
            line_width,
        }
    }

    pub fn begin(&mut self) -> AppResult<()> {
        writeln!(self.out, "{}", self.line_width.directive())?;
        writeln!(self.out, "{TABLE_START}")?;
        Ok(())
    }

    /// Drains `source`, writing the preamble before the first record.
    pub fn render_rows(&mut self, source: &mut dyn RowSource) -> AppResult<usize> {
        let mut n = 0;
        while source.advance()? {
            self.preamble.emit_once(&mut self.out, &*source)?;
            let line = self
                .renderer
                .render_record(source.column_names(), source.current())?;
            self.out.write_all(line.as_bytes())?;
            n += 1;
        }
        tracing::debug!(
            rows = n,
            overrides = self.renderer.registry().len(),
            preamble = ?self.preamble.state(),
            "rendered records"
        );
        Ok(n)
    }

    /// Closes the table and hands back the flushed writer.
    pub fn finish(mut self) -> AppResult<W> {
        writeln!(self.out, "{TABLE_END}")?;
        writeln!(self.out, "{WIDTH_CHECK}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
