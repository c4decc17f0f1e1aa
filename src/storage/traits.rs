use anyhow::Result;

/// String-keyed persistent store holding one JSON document per key.
///
/// Implementations must be last-write-wins per key. There is no transaction
/// spanning two keys.
pub trait KeyValueStore: Send + Sync {
    /// Backend identifier (e.g. "file", "memory").
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
