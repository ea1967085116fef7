mod io;

use crate::{
    cli::Args,
    config::{self, FormatFile},
    core::{connection, query},
    error::AppResult,
    render::{preamble::FormatDescriptor, report::TableReport},
};

use io::open_output;

pub fn run(args: Args) -> AppResult<()> {
    let format_file = args
        .format_file
        .as_deref()
        .map(FormatFile::load)
        .transpose()?;
    let renderer = config::build_renderer(format_file, &args.column_format);

    let conn = connection::open_readonly(&args.db)?;
    let out = open_output(args.output.as_deref())?;

    let mut report = TableReport::new(
        out,
        renderer,
        FormatDescriptor::parse(&args.format),
        args.width.clone(),
    );
    report.begin()?;
    let rows = query::run_report(&conn, &args.query, &mut report)?;
    report.finish()?;

    connection::close(conn, &args.db)?;
    tracing::info!(rows, db = %args.db.display(), "table written");
    Ok(())
}
