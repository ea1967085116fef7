use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::error::AppResult;

/// Buffered sink for the table markup: stdout, or a file when one is given.
pub fn open_output(path: Option<&Path>) -> AppResult<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "writing table to file");
            Box::new(File::create(p)?)
        }
        None => Box::new(std::io::stdout().lock()),
    };
    Ok(BufWriter::new(sink))
}
