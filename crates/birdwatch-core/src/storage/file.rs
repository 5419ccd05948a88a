use std::path::{Path, PathBuf};

use crate::error::{BirdwatchError, Result};

use super::KeyValueStore;

/// One JSON file per key under a directory, the on-disk counterpart of
/// browser local storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for records, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            BirdwatchError::Storage(format!(
                "failed to create storage dir {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(BirdwatchError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys become file names: ASCII alphanumerics plus `_`, `-` and `.`, with
/// no leading dot.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.')
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BirdwatchError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        // Write beside the target and rename so readers never see a torn record.
        let tmp = self
            .dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::now_v7().simple()));
        std::fs::write(&tmp, value).map_err(|e| {
            BirdwatchError::Storage(format!("failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            BirdwatchError::Storage(format!("failed to replace {}: {e}", path.display()))
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BirdwatchError::Storage(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}
