use crate::error::Result;

/// Durable key-value storage for small serialized records.
///
/// Each key holds one opaque string value that is overwritten wholesale on
/// every write, so concurrent writers resolve as last-write-wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the record. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
