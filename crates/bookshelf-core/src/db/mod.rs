//! Local database layer

mod connection;
mod entry_store;
mod migrations;

pub use connection::Database;
pub use entry_store::LibSqlEntryStore;
