pub mod connection;
pub mod query;
pub mod readonly;
pub mod source;
pub mod types;
