pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::{error, info};
use models::{
    calendar::CalendarGrid,
    journal::Journal,
    settings::JournalSettings,
    summary::{DaySummary, JournalSummary},
    trade::{Trade, TradeDraft},
    view::JournalView,
};
use services::{
    aggregate_service::{month_bounds, AggregateService},
    calendar_service::CalendarService,
    trade_service::TradeService,
};
use storage::{manager::StorageManager, traits::KeyValueStore};

use errors::CoreError;

/// Main entry point for the Trade Journal core library.
///
/// Owns the trade list and the store it is persisted to. Every mutation is
/// followed by a synchronous write of the full list; if that write fails the
/// in-memory change is kept, the error is returned, and
/// [`has_unsaved_changes`](Self::has_unsaved_changes) stays `true` until a
/// later [`persist`](Self::persist) succeeds.
#[must_use]
pub struct TradeJournal<S: KeyValueStore> {
    journal: Journal,
    store: S,
    settings: JournalSettings,
    trade_service: TradeService,
    aggregate_service: AggregateService,
    calendar_service: CalendarService,
    /// Set when the last persist attempt failed.
    dirty: bool,
}

impl<S: KeyValueStore> std::fmt::Debug for TradeJournal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeJournal")
            .field("trades", &self.journal.len())
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: KeyValueStore> TradeJournal<S> {
    /// Open the journal saved in `store` under the default key.
    /// Missing or malformed data gives an empty journal; unreadable records
    /// inside an otherwise valid list are skipped.
    pub fn open(store: S) -> Self {
        Self::build(store, JournalSettings::default())
    }

    /// Open with custom settings (e.g. a different storage key).
    pub fn open_with_settings(store: S, settings: JournalSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(store, settings))
    }

    /// Discard in-memory state and re-read the saved trades.
    pub fn reload(&mut self) {
        self.journal = StorageManager::load(&self.store, &self.settings.storage_key);
        self.dirty = false;
    }

    /// Write the full trade list to the store, overwriting the previous value.
    pub fn persist(&mut self) -> Result<(), CoreError> {
        match StorageManager::save(&mut self.store, &self.settings.storage_key, &self.journal) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to persist {} trade(s) to {} store: {e}",
                    self.journal.len(),
                    self.store.name()
                );
                self.dirty = true;
                Err(e)
            }
        }
    }

    // ── Trade Management ────────────────────────────────────────────

    /// Validate and record a new trade, then persist.
    /// Invalid input is rejected before anything changes.
    ///
    /// If only the persist step fails, the trade is already recorded in
    /// memory as the last element of [`trades`](Self::trades) and
    /// [`has_unsaved_changes`](Self::has_unsaved_changes) is `true`; retry
    /// with [`persist`](Self::persist).
    pub fn add_trade(&mut self, draft: TradeDraft) -> Result<Trade, CoreError> {
        let trade = self.trade_service.add_trade(&mut self.journal, draft)?;
        self.persist()?;
        Ok(trade)
    }

    /// Replace the stored record that has `trade.id`, then persist.
    /// Returns `false` when no such trade exists (nothing else changes).
    pub fn update_trade(&mut self, trade: Trade) -> Result<bool, CoreError> {
        let updated = self.trade_service.update_trade(&mut self.journal, trade)?;
        self.persist()?;
        Ok(updated)
    }

    /// Remove a trade by id, then persist.
    /// Returns `false` when no such trade exists.
    pub fn delete_trade(&mut self, id: &str) -> Result<bool, CoreError> {
        let deleted = self.trade_service.delete_trade(&mut self.journal, id);
        self.persist()?;
        Ok(deleted)
    }

    #[must_use]
    pub fn get_trade(&self, id: &str) -> Option<&Trade> {
        self.trade_service.get_trade(&self.journal, id)
    }

    /// All trades in insertion order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.journal.trades
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.journal.len()
    }

    // ── Totals ──────────────────────────────────────────────────────

    #[must_use]
    pub fn day_total(&self, date: NaiveDate) -> f64 {
        self.aggregate_service.day_total(self.trades(), date)
    }

    /// Net result of the month containing `reference`.
    #[must_use]
    pub fn month_total(&self, reference: NaiveDate) -> f64 {
        self.aggregate_service.month_total(self.trades(), reference)
    }

    #[must_use]
    pub fn all_time_total(&self) -> f64 {
        self.aggregate_service.all_time_total(self.trades())
    }

    #[must_use]
    pub fn trades_on_day(&self, date: NaiveDate) -> Vec<&Trade> {
        self.aggregate_service.trades_on_day(self.trades(), date)
    }

    #[must_use]
    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        self.aggregate_service.day_summary(self.trades(), date)
    }

    /// Dashboard figures: all-time total, total of `reference`'s month, trade count.
    #[must_use]
    pub fn summary(&self, reference: NaiveDate) -> JournalSummary {
        let (reference_month, _) = month_bounds(reference);
        JournalSummary {
            reference_month,
            all_time_total: self.all_time_total(),
            month_total: self.month_total(reference),
            trade_count: self.trade_count(),
        }
    }

    // ── Calendar ────────────────────────────────────────────────────

    /// Month grid for `reference_month` with selection and today marked.
    #[must_use]
    pub fn build_grid(
        &self,
        reference_month: NaiveDate,
        selected: NaiveDate,
        today: NaiveDate,
    ) -> CalendarGrid {
        self.calendar_service
            .build_grid(self.trades(), reference_month, selected, today)
    }

    #[must_use]
    pub fn build_grid_for_view(&self, view: &JournalView, today: NaiveDate) -> CalendarGrid {
        self.build_grid(view.displayed_month(), view.selected_date(), today)
    }

    // ── Store & Settings ────────────────────────────────────────────

    /// Returns `true` if the last persist failed and memory is ahead of the store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to reopen it later.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: S, settings: JournalSettings) -> Self {
        let journal = StorageManager::load(&store, &settings.storage_key);
        info!(
            "Opened trade journal with {} trade(s) from {} store",
            journal.len(),
            store.name()
        );
        Self {
            journal,
            store,
            settings,
            trade_service: TradeService::new(),
            aggregate_service: AggregateService::new(),
            calendar_service: CalendarService::new(),
            dirty: false,
        }
    }
}
