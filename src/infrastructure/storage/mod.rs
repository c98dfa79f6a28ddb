pub mod file;
pub mod kv;
pub mod memory;

pub use file::FileKvStore;
pub use kv::KeyValueStore;
pub use memory::{InMemoryKvStore, InMemoryReportRepository};
