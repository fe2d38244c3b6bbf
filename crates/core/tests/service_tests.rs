use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use trade_journal_core::errors::CoreError;
use trade_journal_core::models::journal::Journal;
use trade_journal_core::models::summary::Outcome;
use trade_journal_core::models::trade::{Trade, TradeDraft, TradeType};
use trade_journal_core::services::aggregate_service::{month_bounds, AggregateService};
use trade_journal_core::services::calendar_service::{grid_bounds, CalendarService};
use trade_journal_core::services::trade_service::TradeService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn tr(id: &str, date: NaiveDate, amount: f64, trade_type: TradeType) -> Trade {
    Trade {
        id: id.into(),
        date,
        time: t(12, 0),
        amount,
        trade_type,
        summary: format!("trade {id}"),
    }
}

/// The three-trade example used throughout: +100 and -40 on Mar 1, +25 on Mar 15.
fn march_trades() -> Vec<Trade> {
    vec![
        tr("a", d(2024, 3, 1), 100.0, TradeType::Profit),
        tr("b", d(2024, 3, 1), 40.0, TradeType::Loss),
        tr("c", d(2024, 3, 15), 25.0, TradeType::Profit),
    ]
}

// ═══════════════════════════════════════════════════════════════════
//  TradeService
// ═══════════════════════════════════════════════════════════════════

mod trade_service {
    use super::*;

    #[test]
    fn add_assigns_id_and_appends() {
        let svc = TradeService::new();
        let mut journal = Journal::new();
        let draft = TradeDraft::profit(d(2024, 3, 1), t(9, 30), 100.0, "Opening drive");

        let added = svc.add_trade(&mut journal, draft).unwrap();
        assert!(!added.id.is_empty());
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.trades[0], added);
        assert_eq!(added.summary, "Opening drive");
    }

    #[test]
    fn add_generates_unique_ids() {
        let svc = TradeService::new();
        let mut journal = Journal::new();
        for i in 0..200 {
            let draft = TradeDraft::profit(d(2024, 3, 1), t(9, 30), f64::from(i), "x");
            svc.add_trade(&mut journal, draft).unwrap();
        }
        let mut ids: Vec<&str> = journal.trades.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let svc = TradeService::new();
        let mut journal = Journal::new();
        svc.add_trade(&mut journal, TradeDraft::profit(d(2024, 3, 9), t(9, 0), 1.0, "later date"))
            .unwrap();
        svc.add_trade(&mut journal, TradeDraft::profit(d(2024, 3, 1), t(9, 0), 2.0, "earlier date"))
            .unwrap();
        assert_eq!(journal.trades[0].summary, "later date");
        assert_eq!(journal.trades[1].summary, "earlier date");
    }

    #[test]
    fn add_rejects_invalid_draft_without_mutating() {
        let svc = TradeService::new();
        let mut journal = Journal::new();
        let err = svc
            .add_trade(&mut journal, TradeDraft::profit(d(2024, 3, 1), t(9, 0), 5.0, ""))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(journal.is_empty());

        assert!(svc
            .add_trade(&mut journal, TradeDraft::loss(d(2024, 3, 1), t(9, 0), -5.0, "neg"))
            .is_err());
        assert!(journal.is_empty());
    }

    #[test]
    fn update_replaces_in_place() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        let mut edited = journal.trades[1].clone();
        edited.amount = 10.0;
        edited.trade_type = TradeType::Profit;
        edited.summary = "Actually a small win".into();

        assert!(svc.update_trade(&mut journal, edited.clone()).unwrap());
        assert_eq!(journal.len(), 3);
        assert_eq!(journal.trades[1], edited);
        assert_eq!(journal.trades[0].id, "a");
        assert_eq!(journal.trades[2].id, "c");
    }

    #[test]
    fn update_can_move_trade_to_another_date() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        let mut moved = journal.trades[0].clone();
        moved.date = d(2024, 4, 2);
        svc.update_trade(&mut journal, moved).unwrap();
        assert_eq!(svc.get_trade(&journal, "a").unwrap().date, d(2024, 4, 2));
    }

    #[test]
    fn update_stores_time_to_the_minute() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        let mut edited = journal.trades[2].clone();
        edited.time = NaiveTime::from_hms_opt(16, 45, 59).unwrap();
        svc.update_trade(&mut journal, edited).unwrap();
        assert_eq!(journal.trades[2].time, t(16, 45));
    }

    #[test]
    fn update_missing_id_is_noop() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        let before = journal.clone();
        let ghost = tr("zzz", d(2024, 3, 2), 5.0, TradeType::Profit);
        assert!(!svc.update_trade(&mut journal, ghost).unwrap());
        assert_eq!(journal, before);
    }

    #[test]
    fn update_rejects_invalid_record() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        let before = journal.clone();
        let mut bad = journal.trades[0].clone();
        bad.amount = f64::NAN;
        assert!(svc.update_trade(&mut journal, bad).is_err());
        assert_eq!(journal, before);
    }

    #[test]
    fn delete_removes_only_target() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        assert!(svc.delete_trade(&mut journal, "b"));
        assert_eq!(journal.len(), 2);
        assert!(svc.get_trade(&journal, "b").is_none());
        assert_eq!(journal.trades[0].id, "a");
        assert_eq!(journal.trades[1].id, "c");
    }

    #[test]
    fn delete_missing_is_noop() {
        let svc = TradeService::new();
        let mut journal = Journal::from_trades(march_trades());
        assert!(!svc.delete_trade(&mut journal, "nope"));
        assert_eq!(journal.len(), 3);
    }

    #[test]
    fn get_trade_by_id() {
        let svc = TradeService::new();
        let journal = Journal::from_trades(march_trades());
        assert_eq!(svc.get_trade(&journal, "c").unwrap().amount, 25.0);
        assert!(svc.get_trade(&journal, "x").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AggregateService
// ═══════════════════════════════════════════════════════════════════

mod aggregate_service {
    use super::*;

    #[test]
    fn worked_example() {
        let svc = AggregateService::new();
        let trades = march_trades();
        assert_eq!(svc.day_total(&trades, d(2024, 3, 1)), 60.0);
        assert_eq!(svc.month_total(&trades, d(2024, 3, 5)), 85.0);
        assert_eq!(svc.all_time_total(&trades), 85.0);
    }

    #[test]
    fn day_without_trades_is_zero() {
        let svc = AggregateService::new();
        assert_eq!(svc.day_total(&march_trades(), d(2024, 3, 2)), 0.0);
        assert_eq!(svc.day_total(&[], d(2024, 3, 2)), 0.0);
    }

    #[test]
    fn month_total_includes_first_and_last_day() {
        let svc = AggregateService::new();
        let trades = vec![
            tr("first", d(2024, 2, 1), 1.0, TradeType::Profit),
            tr("last", d(2024, 2, 29), 2.0, TradeType::Profit),
            tr("before", d(2024, 1, 31), 100.0, TradeType::Profit),
            tr("after", d(2024, 3, 1), 100.0, TradeType::Profit),
        ];
        assert_eq!(svc.month_total(&trades, d(2024, 2, 15)), 3.0);
    }

    #[test]
    fn month_total_ignores_same_month_other_year() {
        let svc = AggregateService::new();
        let trades = vec![
            tr("now", d(2024, 3, 10), 5.0, TradeType::Loss),
            tr("then", d(2023, 3, 10), 50.0, TradeType::Profit),
        ];
        assert_eq!(svc.month_total(&trades, d(2024, 3, 31)), -5.0);
    }

    #[test]
    fn all_loss_gives_negative_total() {
        let svc = AggregateService::new();
        let trades = vec![
            tr("x", d(2024, 1, 1), 10.0, TradeType::Loss),
            tr("y", d(2024, 1, 2), 2.5, TradeType::Loss),
        ];
        assert_eq!(svc.all_time_total(&trades), -12.5);
    }

    #[test]
    fn totals_are_not_rounded() {
        let svc = AggregateService::new();
        let trades = vec![
            tr("x", d(2024, 1, 1), 0.1, TradeType::Profit),
            tr("y", d(2024, 1, 1), 0.2, TradeType::Profit),
        ];
        assert_eq!(svc.day_total(&trades, d(2024, 1, 1)), 0.1 + 0.2);
    }

    #[test]
    fn trades_on_day_keeps_insertion_order_not_time_order() {
        let svc = AggregateService::new();
        let mut late = tr("late", d(2024, 3, 1), 1.0, TradeType::Profit);
        late.time = t(16, 0);
        let mut early = tr("early", d(2024, 3, 1), 1.0, TradeType::Profit);
        early.time = t(8, 0);
        let trades = vec![late, tr("other", d(2024, 3, 2), 1.0, TradeType::Loss), early];

        let ids: Vec<&str> = svc
            .trades_on_day(&trades, d(2024, 3, 1))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn day_summary_matches_parts() {
        let svc = AggregateService::new();
        let trades = march_trades();
        let summary = svc.day_summary(&trades, d(2024, 3, 1));
        assert_eq!(summary.date, d(2024, 3, 1));
        assert_eq!(summary.total, 60.0);
        assert_eq!(summary.trade_count(), 2);
        assert_eq!(summary.outcome(), Outcome::Profit);
    }

    #[test]
    fn all_time_equals_sum_of_day_totals() {
        let svc = AggregateService::new();
        let mut trades = march_trades();
        trades.push(tr("d", d(2023, 12, 31), 17.25, TradeType::Loss));
        trades.push(tr("e", d(2024, 7, 4), 3.5, TradeType::Profit));
        trades.push(tr("f", d(2024, 7, 4), 1.0, TradeType::Loss));

        let by_day = svc.totals_by_day(&trades);
        assert_eq!(by_day.len(), 4);
        let from_days: f64 = by_day.keys().map(|date| svc.day_total(&trades, *date)).sum();
        assert!((svc.all_time_total(&trades) - from_days).abs() < 1e-9);
        for (date, total) in &by_day {
            assert_eq!(*total, svc.day_total(&trades, *date));
        }
    }

    #[test]
    fn totals_by_day_sorted_by_date() {
        let svc = AggregateService::new();
        let dates: Vec<NaiveDate> = svc.totals_by_day(&march_trades()).into_keys().collect();
        assert_eq!(dates, vec![d(2024, 3, 1), d(2024, 3, 15)]);
    }

    #[test]
    fn month_bounds_handles_leap_and_december() {
        assert_eq!(month_bounds(d(2024, 2, 10)), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(month_bounds(d(2023, 2, 28)), (d(2023, 2, 1), d(2023, 2, 28)));
        assert_eq!(month_bounds(d(2024, 12, 31)), (d(2024, 12, 1), d(2024, 12, 31)));
        assert_eq!(month_bounds(d(2024, 4, 1)), (d(2024, 4, 1), d(2024, 4, 30)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CalendarService
// ═══════════════════════════════════════════════════════════════════

mod calendar_service {
    use super::*;

    #[test]
    fn march_2024_spans_six_weeks() {
        // Mar 1 2024 is a Friday, Mar 31 a Sunday
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2024, 3, 5), d(2024, 3, 5), d(2024, 3, 20));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.grid_start(), Some(d(2024, 2, 25)));
        assert_eq!(grid.grid_end(), Some(d(2024, 4, 6)));
        assert_eq!(grid.month_start, d(2024, 3, 1));
        assert_eq!(grid.month_end, d(2024, 3, 31));
        assert!(grid.days.iter().all(|c| c.total == 0.0 && c.trades.is_empty()));
    }

    #[test]
    fn february_2015_is_exactly_four_weeks() {
        // starts on Sunday, ends on Saturday: no padding on either side
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2015, 2, 1), d(2015, 2, 1), d(2015, 2, 1));
        assert_eq!(grid.len(), 28);
        assert!(grid.days.iter().all(|c| c.is_current_month));
    }

    #[test]
    fn month_starting_sunday_has_no_leading_days() {
        // September 2024 starts on a Sunday, ends on a Monday
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2024, 9, 1), d(2024, 9, 1), d(2024, 9, 1));
        assert_eq!(grid.grid_start(), Some(d(2024, 9, 1)));
        assert_eq!(grid.grid_end(), Some(d(2024, 10, 5)));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn month_ending_saturday_has_no_trailing_days() {
        // August 2024 ends on a Saturday
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2024, 8, 1), d(2024, 8, 1), d(2024, 8, 1));
        assert_eq!(grid.grid_end(), Some(d(2024, 8, 31)));
        assert_eq!(grid.grid_start(), Some(d(2024, 7, 28)));
    }

    #[test]
    fn every_month_is_whole_weeks_with_contiguous_current_run() {
        let svc = CalendarService::new();
        for year in [1999, 2000, 2015, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = svc.build_grid(&[], d(year, month, 1), d(year, month, 1), d(year, month, 1));
                assert_eq!(grid.len() % 7, 0, "{year}-{month}");
                assert!(grid.len() >= 28 && grid.len() <= 42, "{year}-{month}");
                assert_eq!(grid.days[0].date.weekday(), Weekday::Sun);
                assert_eq!(grid.days[grid.len() - 1].date.weekday(), Weekday::Sat);

                let flags: Vec<bool> = grid.days.iter().map(|c| c.is_current_month).collect();
                let first = flags.iter().position(|f| *f).unwrap();
                let last = flags.iter().rposition(|f| *f).unwrap();
                assert!(flags[first..=last].iter().all(|f| *f), "{year}-{month}");
                assert_eq!(grid.days[first].date, grid.month_start);
                assert_eq!(grid.days[last].date, grid.month_end);
                assert_eq!(last - first + 1, grid.month_end.day() as usize);

                for pair in grid.days.windows(2) {
                    assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
                }
            }
        }
    }

    #[test]
    fn cells_carry_day_aggregates() {
        let svc = CalendarService::new();
        let grid = svc.build_grid(&march_trades(), d(2024, 3, 1), d(2024, 3, 1), d(2024, 3, 1));

        let first = grid.day(d(2024, 3, 1)).unwrap();
        assert_eq!(first.total, 60.0);
        assert_eq!(first.trade_count(), 2);
        assert_eq!(first.trades[0].id, "a");
        assert_eq!(first.trades[1].id, "b");
        assert_eq!(first.outcome(), Outcome::Profit);

        let mid = grid.day(d(2024, 3, 15)).unwrap();
        assert_eq!(mid.total, 25.0);

        let empty = grid.day(d(2024, 3, 2)).unwrap();
        assert!(!empty.has_trades());
        assert_eq!(empty.outcome(), Outcome::Flat);

        let month_sum: f64 = grid.current_month_days().map(|c| c.total).sum();
        assert_eq!(month_sum, 85.0);
    }

    #[test]
    fn padding_days_from_adjacent_months_show_their_trades() {
        let svc = CalendarService::new();
        let trades = vec![tr("feb", d(2024, 2, 26), 7.0, TradeType::Loss)];
        let grid = svc.build_grid(&trades, d(2024, 3, 1), d(2024, 3, 1), d(2024, 3, 1));
        let cell = grid.day(d(2024, 2, 26)).unwrap();
        assert!(!cell.is_current_month);
        assert_eq!(cell.total, -7.0);
        assert_eq!(cell.outcome(), Outcome::Loss);
    }

    #[test]
    fn selected_and_today_flags() {
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2024, 3, 1), d(2024, 3, 12), d(2024, 4, 2));

        let selected: Vec<NaiveDate> = grid.days.iter().filter(|c| c.is_selected).map(|c| c.date).collect();
        assert_eq!(selected, vec![d(2024, 3, 12)]);

        // today sits in the trailing padding of the March grid
        let today: Vec<NaiveDate> = grid.days.iter().filter(|c| c.is_today).map(|c| c.date).collect();
        assert_eq!(today, vec![d(2024, 4, 2)]);
    }

    #[test]
    fn flags_absent_when_outside_grid() {
        let svc = CalendarService::new();
        let grid = svc.build_grid(&[], d(2024, 3, 1), d(2020, 1, 1), d(2030, 1, 1));
        assert!(grid.days.iter().all(|c| !c.is_selected && !c.is_today));
    }

    #[test]
    fn reference_day_within_month_does_not_matter() {
        let svc = CalendarService::new();
        let trades = march_trades();
        let a = svc.build_grid(&trades, d(2024, 3, 1), d(2024, 3, 1), d(2024, 3, 1));
        let b = svc.build_grid(&trades, d(2024, 3, 31), d(2024, 3, 1), d(2024, 3, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn grid_bounds_helper() {
        assert_eq!(
            grid_bounds(d(2024, 3, 1), d(2024, 3, 31)),
            (d(2024, 2, 25), d(2024, 4, 6))
        );
    }
}
