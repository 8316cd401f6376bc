mod file_kv;
mod memory_kv;

pub use file_kv::{default_store_path, FileKeyValueStore, DEFAULT_STORE_FILE};
pub use memory_kv::InMemoryKeyValueStore;
