use std::path::PathBuf;

use clap::Parser;

use crate::render::report::LineWidth;

/// Render the result of one SQLite query as tbl(1) input.
#[derive(Parser, Debug, Clone)]
#[command(name = "sqlite-tbl", version)]
pub struct Args {
    /// SQLite database to query (opened read-only).
    #[arg(short = 'd', long = "db")]
    pub db: PathBuf,

    /// SQL query to run.
    #[arg(short = 'q', long = "query")]
    pub query: String,

    /// Line length to add, in inches below 100, else in troff units.
    #[arg(short = 'w', long = "width", default_value = "6.5")]
    pub width: LineWidth,

    /// Table options, or a literal `options;layout` preamble.
    #[arg(short = 'f', long = "format", default_value = "box")]
    pub format: String,

    /// Numeric template for a column, as `column,template` (repeatable).
    #[arg(short = 'p', long = "column-format", value_name = "COLUMN,TEMPLATE")]
    pub column_format: Vec<String>,

    /// JSON file with default and per-column numeric templates.
    #[arg(long)]
    pub format_file: Option<PathBuf>,

    /// Write the table to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
