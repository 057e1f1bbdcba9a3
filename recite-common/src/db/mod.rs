//! SQLite database access
//!
//! Records are stored as JSON documents keyed by their natural ids, with a
//! few lookup columns extracted for indexed queries.

pub mod init;

pub use init::{create_tables, init_database_pool, init_memory_pool};
