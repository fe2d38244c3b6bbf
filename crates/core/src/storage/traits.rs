use crate::errors::CoreError;

/// A string-keyed, string-valued persistence slot (the browser's
/// `localStorage` shape).
///
/// The journal only ever touches one key. Backends are swappable so the
/// same core runs against a file on disk, an in-memory map in tests, or a
/// host-provided store behind FFI.
pub trait KeyValueStore {
    /// Human-readable backend name (for logs/errors).
    fn name(&self) -> &str;

    /// Read the value under `key`. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write `value` under `key`, replacing any previous value in full.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}
