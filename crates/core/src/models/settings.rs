use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Key under which the trade list has always been stored.
pub const DEFAULT_STORAGE_KEY: &str = "tradingData";

/// Journal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Key of the single persistence slot holding the serialized trade list.
    pub storage_key: String,
}

impl JournalSettings {
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Storage key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
