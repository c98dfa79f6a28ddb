//! External concerns: key-value storage, database, advisory HTTP client

pub mod advisory;
pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
pub use storage::{FileKvStore, InMemoryKvStore, InMemoryReportRepository, KeyValueStore};
