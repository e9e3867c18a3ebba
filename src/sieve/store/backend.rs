use crate::error::Result;

/// Abstract interface for raw key-value persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while the
/// saved-filter functions in [`crate::store`] handle the "what" (encoding,
/// versioning, recovery from bad data).
pub trait KvBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic so a reader never observes a partial value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// List all keys holding a value, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
