use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::journal::Journal;
use crate::models::trade::{hour_minute, Trade, TradeDraft};

/// Adds, replaces and removes trades in a journal.
///
/// Pure in-memory logic — persistence is the caller's job.
pub struct TradeService;

impl TradeService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft, give it a fresh id and append it.
    /// Returns a copy of the stored record.
    pub fn add_trade(&self, journal: &mut Journal, draft: TradeDraft) -> Result<Trade, CoreError> {
        draft.validate()?;
        let id = self.generate_id(journal);
        let trade = Trade::from_draft(id, draft);
        journal.trades.push(trade.clone());
        Ok(trade)
    }

    /// Replace the record with the same id, keeping its position.
    ///
    /// The whole record is written (no field merging), with `time` cut to
    /// minutes as it will be stored. Returns `Ok(false)` without touching the
    /// journal when no record has that id.
    pub fn update_trade(&self, journal: &mut Journal, mut trade: Trade) -> Result<bool, CoreError> {
        trade.validate()?;
        trade.time = hour_minute::truncate(trade.time);
        match journal.trades.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => {
                *existing = trade;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a trade by id. Returns whether anything was removed.
    pub fn delete_trade(&self, journal: &mut Journal, id: &str) -> bool {
        let before = journal.trades.len();
        journal.trades.retain(|t| t.id != id);
        journal.trades.len() != before
    }

    pub fn get_trade<'a>(&self, journal: &'a Journal, id: &str) -> Option<&'a Trade> {
        journal.trades.iter().find(|t| t.id == id)
    }

    /// Time-ordered UUID (v7), re-rolled on the off chance it is already taken.
    fn generate_id(&self, journal: &Journal) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if !journal.contains(&id) {
                return id;
            }
        }
    }
}

impl Default for TradeService {
    fn default() -> Self {
        Self::new()
    }
}
