//! tbl(1) rendering of a single result set.
//!
//! [`report::TableReport`] frames the table; [`preamble::Preamble`] writes the
//! options, layout and header block on the first row; [`row::RowRenderer`]
//! turns every row into a tab separated record using the per-column
//! templates held in [`registry::FormatRegistry`].

pub mod layout;
pub mod preamble;
pub mod registry;
pub mod report;
pub mod row;
pub mod template;
