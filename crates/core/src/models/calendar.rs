use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::summary::Outcome;
use super::trade::Trade;

/// Number of columns in the grid (Sunday..Saturday).
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,

    /// Falls inside the month the grid was built for
    pub is_current_month: bool,

    /// Equals the caller's selected date
    pub is_selected: bool,

    /// Equals the caller's "today"
    pub is_today: bool,

    /// Net result of the day's trades
    pub total: f64,

    /// The day's trades, in insertion order
    pub trades: Vec<Trade>,
}

impl CalendarDay {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn has_trades(&self) -> bool {
        !self.trades.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.total)
    }
}

/// A Sunday-first grid of whole weeks covering one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarGrid {
    /// First day of the displayed month
    pub month_start: NaiveDate,

    /// Last day of the displayed month
    pub month_end: NaiveDate,

    /// Every cell, `grid_start..=grid_end`, row-major
    pub days: Vec<CalendarDay>,
}

impl CalendarGrid {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn grid_start(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn grid_end(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    /// Rows of seven days, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / DAYS_PER_WEEK
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Only the cells belonging to the displayed month.
    pub fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.is_current_month)
    }
}
