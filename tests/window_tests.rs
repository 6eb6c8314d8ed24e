// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use walletwise::analytics::window::{
    expenses_for_window, month_span, spent_for_month, window_months, window_months_for,
};
use walletwise::models::{Expense, FinanceState};
use walletwise::month::MonthKey;

fn mk(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn expense(amount: i64, date: &str) -> Expense {
    Expense {
        id: uuid::Uuid::new_v4(),
        name: "x".into(),
        category: "misc".into(),
        amount: Decimal::from(amount),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        icon: String::new(),
        note: None,
        recurring: false,
    }
}

#[test]
fn window_crosses_year_boundary() {
    let months: Vec<String> = window_months(mk("2026-02"), 3)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2025-12", "2026-01", "2026-02"]);
}

#[test]
fn window_is_contiguous_and_ends_at_anchor() {
    for size in [1usize, 3, 6, 12] {
        let anchor = mk("2026-01");
        let months = window_months(anchor, size);
        assert_eq!(months.len(), size);
        assert_eq!(*months.last().unwrap(), anchor);
        for pair in months.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }
    assert_eq!(window_months(mk("2026-07"), 1), vec![mk("2026-07")]);
}

#[test]
fn windows_at_the_earliest_month_stay_distinct() {
    let earliest = mk("0001-01");
    for size in [1usize, 3, 6, 12] {
        let months = window_months(earliest, size);
        assert_eq!(months.len(), size);
        assert_eq!(*months.last().unwrap(), earliest);
        for pair in months.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }
    assert_eq!(window_months(earliest, 12)[0].to_string(), "0000-02");

    // Year zero is only reachable by arithmetic.
    assert!("0000-02".parse::<MonthKey>().is_err());
    assert_eq!(window_months_for("0000-02", 1), vec![MonthKey::EPOCH]);
    assert_eq!(window_months_for("0000-02-14", 1), vec![mk("0001-02")]);
}

#[test]
fn malformed_anchor_falls_back_to_epoch() {
    let months = window_months_for("not-a-month", 3);
    assert_eq!(months.len(), 3);
    assert_eq!(*months.last().unwrap(), MonthKey::EPOCH);
    assert_eq!(months[0].to_string(), "1969-11");
    assert_eq!(window_months_for("2026-2", 1), vec![MonthKey::EPOCH]);
    assert_eq!(window_months_for("2026-02-14", 1), vec![mk("2026-02")]);
}

#[test]
fn month_arithmetic_rolls_years() {
    assert_eq!(mk("2025-12").next(), mk("2026-01"));
    assert_eq!(mk("2026-01").prev(), mk("2025-12"));
    assert_eq!(mk("2026-02").add_months(-14), mk("2024-12"));
    assert_eq!(mk("2025-11").months_until(mk("2026-02")), 3);
    assert_eq!(month_span(mk("2025-11"), mk("2026-02")).len(), 4);
    assert!(month_span(mk("2026-03"), mk("2026-02")).is_empty());
}

#[test]
fn window_and_month_filters_use_month_keys() {
    let state = FinanceState {
        expenses: vec![
            expense(10, "2025-11-30"),
            expense(20, "2025-12-01"),
            expense(30, "2026-02-28"),
        ],
        ..Default::default()
    };
    assert_eq!(expenses_for_window(&state, mk("2026-02"), 3).len(), 2);
    assert_eq!(spent_for_month(&state, mk("2026-02")), Decimal::from(30));
    assert_eq!(spent_for_month(&state, mk("2026-01")), Decimal::ZERO);
}
