//! Persistence layer: record collections over JSON files, libSQL, or memory.

pub mod json_file;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod seed;
pub mod traits;

pub use json_file::JsonFileStore;
pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use seed::seed_missing;
pub use traits::{RecordKind, RecordStore, load, load_document, save, save_document};
