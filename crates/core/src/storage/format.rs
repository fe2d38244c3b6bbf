use std::collections::HashSet;

use log::warn;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::journal::Journal;
use crate::models::trade::Trade;

/// Result of decoding a persisted trade list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// Every record that parsed, in stored order, ids unique
    pub journal: Journal,

    /// Records that could not be read as a trade (bad date, empty time, null amount…)
    pub skipped: usize,

    /// Records dropped because an earlier record already used their id
    pub duplicates: usize,
}

/// Encode the journal as the persisted JSON array.
///
/// Layout (one object per trade, insertion order):
/// ```text
/// [{"id":"…","date":"2024-03-01","time":"09:30","amount":100.0,"type":"profit","summary":"…"}]
/// ```
pub fn encode(journal: &Journal) -> Result<String, CoreError> {
    serde_json::to_string(journal)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize trades: {e}")))
}

/// Decode a persisted JSON array back into a journal.
///
/// Only the outer shape is strict: anything but a JSON array is an error.
/// Each element is read on its own, so one unreadable record is skipped
/// (with a warning) instead of taking the rest of the history with it.
/// Records repeating an id already seen are dropped, keeping the first.
pub fn decode(data: &str) -> Result<Decoded, CoreError> {
    let records: Vec<Value> = serde_json::from_str(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize trades: {e}")))?;

    let mut decoded = Decoded::default();
    let mut seen = HashSet::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let trade = match serde_json::from_value::<Trade>(record) {
            Ok(trade) => trade,
            Err(e) => {
                warn!("Skipping unreadable trade record #{index}: {e}");
                decoded.skipped += 1;
                continue;
            }
        };
        if !seen.insert(trade.id.clone()) {
            warn!("Skipping trade record #{index}: duplicate id '{}'", trade.id);
            decoded.duplicates += 1;
            continue;
        }
        decoded.journal.trades.push(trade);
    }

    Ok(decoded)
}
