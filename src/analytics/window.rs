// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::aggregate::sum_amounts;
use crate::models::{Expense, FinanceState};
use crate::month::MonthKey;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// `size` contiguous months ending at `anchor`, oldest first.
pub fn window_months(anchor: MonthKey, size: usize) -> Vec<MonthKey> {
    (0..size)
        .rev()
        .map(|back| anchor.add_months(-(back as i32)))
        .collect()
}

/// Same as [`window_months`] but for a raw `YYYY-MM` token; unparsable
/// anchors resolve to `1970-01`.
pub fn window_months_for(anchor: &str, size: usize) -> Vec<MonthKey> {
    window_months(MonthKey::parse_or_epoch(anchor), size)
}

/// The dashboard window ending at the selected month.
pub fn dashboard_months(state: &FinanceState) -> Vec<MonthKey> {
    window_months(state.selected_month, state.dashboard_window.months())
}

pub fn dashboard_month_set(state: &FinanceState) -> BTreeSet<MonthKey> {
    dashboard_months(state).into_iter().collect()
}

/// Inclusive ascending run of months; empty when `start` is after `end`.
pub fn month_span(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
    let len = start.months_until(end);
    if len < 0 {
        return Vec::new();
    }
    (0..=len).map(|i| start.add_months(i as i32)).collect()
}

pub fn expenses_for_window(state: &FinanceState, anchor: MonthKey, size: usize) -> Vec<&Expense> {
    let months: BTreeSet<MonthKey> = window_months(anchor, size).into_iter().collect();
    state
        .expenses
        .iter()
        .filter(|e| months.contains(&e.month()))
        .collect()
}

pub fn expenses_for_month(state: &FinanceState, month: MonthKey) -> impl Iterator<Item = &Expense> {
    state.expenses.iter().filter(move |e| e.month() == month)
}

pub fn spent_for_month(state: &FinanceState, month: MonthKey) -> Decimal {
    sum_amounts(expenses_for_month(state, month).map(|e| e.amount))
}
