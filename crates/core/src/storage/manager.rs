use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::journal::Journal;

use super::format;
use super::traits::KeyValueStore;

/// High-level storage operations: load/save the trade list from/to one slot.
pub struct StorageManager;

impl StorageManager {
    /// Read the journal stored under `key`.
    ///
    /// Never fails: a missing key, an unreadable backend or content that is
    /// not a JSON array all yield an empty journal. Inside a valid array,
    /// unreadable records are skipped and the rest are kept.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Journal {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved trades under '{key}' in {} store", store.name());
                return Journal::new();
            }
            Err(e) => {
                warn!("Reading '{key}' from {} store failed, starting empty: {e}", store.name());
                return Journal::new();
            }
        };

        match format::decode(&raw) {
            Ok(decoded) => {
                if decoded.skipped > 0 || decoded.duplicates > 0 {
                    warn!(
                        "Loaded '{key}' partially: {} unreadable and {} duplicate record(s) skipped",
                        decoded.skipped, decoded.duplicates
                    );
                }
                debug!("Loaded {} trade(s) from '{key}'", decoded.journal.len());
                decoded.journal
            }
            Err(e) => {
                warn!("Saved trades under '{key}' are malformed, starting empty: {e}");
                Journal::new()
            }
        }
    }

    /// Serialize the full journal and overwrite the slot under `key`.
    pub fn save<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        journal: &Journal,
    ) -> Result<(), CoreError> {
        let encoded = format::encode(journal)?;
        store.set(key, &encoded)?;
        debug!(
            "Persisted {} trade(s) ({} bytes) to '{key}' in {} store",
            journal.len(),
            encoded.len(),
            store.name()
        );
        Ok(())
    }
}
