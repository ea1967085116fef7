pub mod tbl;
