//! Storage engine for the wellness server
//!
//! Handles SQLite database operations, journal mode, and schema management.

mod connection;
mod migrations;
pub mod queries;

pub use connection::Storage;
pub use migrations::SCHEMA_VERSION;
