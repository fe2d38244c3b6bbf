use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// UI navigation state: which month is on screen and which day is selected.
///
/// Owned by the top-level controller and handed to
/// [`TradeJournal::build_grid_for_view`](crate::TradeJournal::build_grid_for_view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalView {
    displayed_month: NaiveDate,
    selected_date: NaiveDate,
}

impl JournalView {
    /// Start on today's month with today selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: first_of_month(today),
            selected_date: today,
        }
    }

    /// First day of the month on screen.
    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Move forward one month. Saturates at the end of chrono's date range.
    pub fn next_month(&mut self) {
        if let Some(next) = self.displayed_month.checked_add_months(Months::new(1)) {
            self.displayed_month = next;
        }
    }

    /// Move back one month. Saturates at the start of chrono's date range.
    pub fn prev_month(&mut self) {
        if let Some(prev) = self.displayed_month.checked_sub_months(Months::new(1)) {
            self.displayed_month = prev;
        }
    }

    /// Jump to the month containing `date`.
    pub fn show_month(&mut self, date: NaiveDate) {
        self.displayed_month = first_of_month(date);
    }

    /// Selection does not change the displayed month.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}
