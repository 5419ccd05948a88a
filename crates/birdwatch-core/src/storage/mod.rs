mod backend;
mod file;
mod memory;
mod sqlite;

pub use backend::KeyValueStore;
pub(crate) use file::is_valid_key;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::config::BirdwatchConfig;
use crate::error::{BirdwatchError, Result};

/// Enum wrapper for storage backends. Dispatches to the concrete implementation.
pub enum Storage {
    File(FileStore),
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Storage::File(s) => s.get(key),
            Storage::Sqlite(s) => s.get(key),
            Storage::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Storage::File(s) => s.set(key, value),
            Storage::Sqlite(s) => s.set(key, value),
            Storage::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Storage::File(s) => s.remove(key),
            Storage::Sqlite(s) => s.remove(key),
            Storage::Memory(s) => s.remove(key),
        }
    }
}

impl Storage {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::File(_) => "file",
            Storage::Sqlite(_) => "sqlite",
            Storage::Memory(_) => "memory",
        }
    }

    /// Where records live on disk, if anywhere.
    pub fn location(&self) -> Option<PathBuf> {
        match self {
            Storage::File(s) => Some(s.dir().to_path_buf()),
            Storage::Sqlite(s) => Some(s.path().to_path_buf()),
            Storage::Memory(_) => None,
        }
    }
}

/// Create a storage backend from the given configuration.
pub fn create_backend(config: &BirdwatchConfig) -> Result<Storage> {
    let custom_path = config.storage.path.as_ref().map(PathBuf::from);
    match config.storage.backend.as_str() {
        "file" => {
            let dir = match custom_path {
                Some(p) => p,
                None => BirdwatchConfig::data_dir()?.join("storage"),
            };
            Ok(Storage::File(FileStore::open(dir)?))
        }
        "sqlite" => {
            let path = match custom_path {
                Some(p) => p,
                None => BirdwatchConfig::data_dir()?.join("birdwatch.db"),
            };
            Ok(Storage::Sqlite(SqliteStore::open(path)?))
        }
        "memory" => Ok(Storage::Memory(MemoryStore::new())),
        other => Err(BirdwatchError::Config(format!(
            "unknown storage backend: {other}"
        ))),
    }
}
