use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Sign of an aggregated total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Profit,
    Loss,
    Flat,
}

impl Outcome {
    pub fn of(total: f64) -> Self {
        if total > 0.0 {
            Outcome::Profit
        } else if total < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Flat
        }
    }
}

/// All trades of one calendar day and their net result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,

    /// Sum of signed contributions (unrounded)
    pub total: f64,

    /// That day's trades, in insertion order
    pub trades: Vec<Trade>,
}

impl DaySummary {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.total)
    }
}

/// Dashboard figures for the whole journal at a reference month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSummary {
    /// First day of the month `month_total` was computed for
    pub reference_month: NaiveDate,

    /// Net result of every trade ever recorded
    pub all_time_total: f64,

    /// Net result of the reference month
    pub month_total: f64,

    /// Number of trades in the journal
    pub trade_count: usize,
}

impl JournalSummary {
    /// A zero balance is shown as profit.
    pub fn is_profitable(&self) -> bool {
        self.all_time_total >= 0.0
    }
}
