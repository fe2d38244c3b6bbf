use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::calendar::{CalendarDay, CalendarGrid};
use crate::models::trade::Trade;
use crate::services::aggregate_service::month_bounds;

/// Builds the month view: whole Sunday-to-Saturday weeks covering a month,
/// each cell annotated with that day's trades and net result.
///
/// Stateless per call. "Today" is passed in rather than read from the clock.
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the grid for the month containing `reference_month`.
    ///
    /// The grid starts on the Sunday on or before the 1st and ends on the
    /// Saturday on or after the last day, so its length is always a multiple
    /// of 7 (28, 35 or 42).
    pub fn build_grid(
        &self,
        trades: &[Trade],
        reference_month: NaiveDate,
        selected: NaiveDate,
        today: NaiveDate,
    ) -> CalendarGrid {
        let (month_start, month_end) = month_bounds(reference_month);
        let (grid_start, grid_end) = grid_bounds(month_start, month_end);

        // Index trades by date once: O(days + trades) instead of O(days × trades)
        let mut trades_by_date: HashMap<NaiveDate, Vec<&Trade>> = HashMap::new();
        for trade in trades {
            if trade.date >= grid_start && trade.date <= grid_end {
                trades_by_date.entry(trade.date).or_default().push(trade);
            }
        }

        let days = grid_start
            .iter_days()
            .take_while(|d| *d <= grid_end)
            .map(|date| {
                let day_trades: Vec<Trade> = trades_by_date
                    .get(&date)
                    .map(|ts| ts.iter().map(|t| (*t).clone()).collect())
                    .unwrap_or_default();
                let total = day_trades.iter().map(Trade::signed_amount).sum();

                CalendarDay {
                    date,
                    is_current_month: date >= month_start && date <= month_end,
                    is_selected: date == selected,
                    is_today: date == today,
                    total,
                    trades: day_trades,
                }
            })
            .collect();

        CalendarGrid {
            month_start,
            month_end,
            days,
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

/// Widen a month to whole Sunday-first weeks.
pub fn grid_bounds(month_start: NaiveDate, month_end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let lead = i64::from(month_start.weekday().num_days_from_sunday());
    let trail = 6 - i64::from(month_end.weekday().num_days_from_sunday());
    let start = month_start
        .checked_sub_signed(Duration::days(lead))
        .unwrap_or(NaiveDate::MIN);
    let end = month_end
        .checked_add_signed(Duration::days(trail))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}
