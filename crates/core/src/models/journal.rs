use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// The trade collection. This is exactly what gets persisted: it serializes
/// as a bare JSON array of trades, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    pub trades: Vec<Trade>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trades(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.trades.iter().any(|t| t.id == id)
    }
}
