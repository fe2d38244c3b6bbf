use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

use crate::models::summary::DaySummary;
use crate::models::trade::Trade;

/// First and last day of the month containing `reference`.
pub fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference.with_day(1).unwrap_or(reference);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        // only December of chrono's last year lands here
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Signed totals over a trade sequence.
///
/// Stateless — every function only reads the slice it is given. Totals are
/// plain `f64` sums; rounding for display is left to the caller.
pub struct AggregateService;

impl AggregateService {
    pub fn new() -> Self {
        Self
    }

    /// Net result of every trade dated exactly `date`.
    pub fn day_total(&self, trades: &[Trade], date: NaiveDate) -> f64 {
        trades
            .iter()
            .filter(|t| t.date == date)
            .map(Trade::signed_amount)
            .sum()
    }

    /// Net result of every trade within the month containing `reference`
    /// (first to last day, inclusive).
    pub fn month_total(&self, trades: &[Trade], reference: NaiveDate) -> f64 {
        let (start, end) = month_bounds(reference);
        trades
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .map(Trade::signed_amount)
            .sum()
    }

    pub fn all_time_total(&self, trades: &[Trade]) -> f64 {
        trades.iter().map(Trade::signed_amount).sum()
    }

    /// Trades dated exactly `date`, in the order they appear in `trades`.
    pub fn trades_on_day<'a>(&self, trades: &'a [Trade], date: NaiveDate) -> Vec<&'a Trade> {
        trades.iter().filter(|t| t.date == date).collect()
    }

    /// Everything the day-detail view needs for one date.
    pub fn day_summary(&self, trades: &[Trade], date: NaiveDate) -> DaySummary {
        let day_trades: Vec<Trade> = trades.iter().filter(|t| t.date == date).cloned().collect();
        let total = day_trades.iter().map(Trade::signed_amount).sum();
        DaySummary {
            date,
            total,
            trades: day_trades,
        }
    }

    /// Net result per date, for every date that has at least one trade.
    pub fn totals_by_day(&self, trades: &[Trade]) -> BTreeMap<NaiveDate, f64> {
        let mut totals = BTreeMap::new();
        for trade in trades {
            *totals.entry(trade.date).or_insert(0.0) += trade.signed_amount();
        }
        totals
    }
}

impl Default for AggregateService {
    fn default() -> Self {
        Self::new()
    }
}
