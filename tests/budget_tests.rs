// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use walletwise::analytics::aggregate::{
    budget_for_month, budget_summary, category_totals, expenses_in_scope, goals_in_scope,
    is_over_limit, lifetime_spent, monthly_spending, over_limit_count, savings_summary,
};
use walletwise::analytics::window::spent_for_month;
use walletwise::db::MemorySlot;
use walletwise::errors::StoreError;
use walletwise::models::{DashboardWindow, Expense, ExpenseDraft, FinanceState, SavingGoal};
use walletwise::month::MonthKey;
use walletwise::store::Store;
use walletwise::validate::MAX_AMOUNT;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn mk(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(category: &str, amount: &str, date: &str) -> Expense {
    Expense {
        id: uuid::Uuid::new_v4(),
        name: category.into(),
        category: category.into(),
        amount: dec(amount),
        date: day(date),
        icon: String::new(),
        note: None,
        recurring: false,
    }
}

fn goal(saved: &str, date: &str) -> SavingGoal {
    SavingGoal {
        id: uuid::Uuid::new_v4(),
        name: "Goal".into(),
        category: "Misc".into(),
        target_amount: dec("1000"),
        saved_amount: dec(saved),
        date: day(date),
        icon: String::new(),
        emergency: false,
    }
}

fn february() -> FinanceState {
    FinanceState {
        selected_month: mk("2026-02"),
        spending_budget: dec("3000"),
        expenses: vec![
            expense("Groceries", "56", "2026-02-18"),
            expense("Lunch", "12.5", "2026-02-19"),
        ],
        ..Default::default()
    }
}

#[test]
fn groceries_and_lunch_scenario() {
    let state = february();
    let totals = category_totals(&state, mk("2026-02"));
    let pairs: Vec<(&str, Decimal)> = totals
        .iter()
        .map(|t| (t.category.as_str(), t.amount))
        .collect();
    assert_eq!(pairs, vec![("Groceries", dec("56")), ("Lunch", dec("12.5"))]);

    let summary = budget_summary(&state, mk("2026-02"));
    assert_eq!(summary.spent, dec("68.5"));
    assert_eq!(summary.left, dec("2931.5"));
    assert_eq!(summary.percent_used.round_dp(2), dec("2.28"));
}

#[test]
fn equal_totals_keep_first_seen_order() {
    let state = FinanceState {
        expenses: vec![
            expense("Coffee", "10", "2026-02-01"),
            expense("Books", "10", "2026-02-02"),
            expense("Rent", "50", "2026-02-03"),
        ],
        ..Default::default()
    };
    let order: Vec<String> = category_totals(&state, mk("2026-02"))
        .into_iter()
        .map(|t| t.category)
        .collect();
    assert_eq!(order, vec!["Rent", "Coffee", "Books"]);
}

#[test]
fn empty_month_has_zero_percentages() {
    let state = february();
    assert!(category_totals(&state, mk("2026-03")).is_empty());
    let summary = budget_summary(&state, mk("2026-03"));
    assert_eq!(summary.spent, Decimal::ZERO);

    let unbudgeted = FinanceState {
        spending_budget: Decimal::ZERO,
        ..february()
    };
    assert_eq!(
        budget_summary(&unbudgeted, mk("2026-02")).percent_used,
        Decimal::ZERO
    );
}

#[test]
fn limit_breach_flips_without_hysteresis() {
    let mut store = Store::with_state(Box::new(MemorySlot::default()), february());
    let feb = mk("2026-02");

    store.set_category_limit("Groceries", dec("400")).unwrap();
    assert!(!is_over_limit(store.state(), feb, "Groceries"));
    assert_eq!(over_limit_count(store.state(), feb), 0);

    store.set_category_limit("Groceries", dec("50")).unwrap();
    assert!(is_over_limit(store.state(), feb, "Groceries"));
    assert_eq!(over_limit_count(store.state(), feb), 1);

    // Spend equal to the limit is not a breach.
    store.set_category_limit("Groceries", dec("56")).unwrap();
    assert!(!is_over_limit(store.state(), feb, "Groceries"));

    store.set_category_limit("Lunch", dec("10")).unwrap();
    store.set_category_limit("Groceries", dec("1")).unwrap();
    assert_eq!(over_limit_count(store.state(), feb), 2);

    store.clear_category_limit("Lunch").unwrap();
    assert_eq!(over_limit_count(store.state(), feb), 1);
    assert!(!is_over_limit(store.state(), feb, "Unknown"));
}

#[test]
fn month_budget_overrides_spending_budget() {
    let mut store = Store::with_state(Box::new(MemorySlot::default()), february());
    store
        .set_month_budget(mk("2026-02"), Some(dec("100")))
        .unwrap();
    assert_eq!(budget_for_month(store.state(), mk("2026-02")), dec("100"));
    assert_eq!(budget_for_month(store.state(), mk("2026-03")), dec("3000"));
    assert_eq!(
        budget_summary(store.state(), mk("2026-02")).left,
        dec("31.5")
    );

    store.set_month_budget(mk("2026-02"), None).unwrap();
    assert_eq!(budget_for_month(store.state(), mk("2026-02")), dec("3000"));
    assert!(store.set_spending_budget(dec("-1")).is_err());
}

#[test]
fn amounts_above_the_cap_are_rejected() {
    assert_eq!(MAX_AMOUNT, dec("1000000000000000"));
    let mut store = Store::with_state(Box::new(MemorySlot::default()), february());
    let before = store.state().clone();
    let draft = |amount: Decimal| ExpenseDraft {
        name: "Yacht".into(),
        category: "Toys".into(),
        amount,
        date: day("2026-02-20"),
        icon: String::new(),
        note: None,
        recurring: false,
    };

    let err = store
        .add_expense(draft(MAX_AMOUNT + Decimal::ONE))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidValue { field: "amount", .. }));
    assert!(matches!(
        store.set_spending_budget(dec("5000000000000000")).unwrap_err(),
        StoreError::InvalidValue { .. }
    ));
    assert_eq!(*store.state(), before);

    store.add_expense(draft(MAX_AMOUNT)).unwrap();
    assert_eq!(
        spent_for_month(store.state(), mk("2026-02")),
        MAX_AMOUNT + dec("68.5")
    );
}

#[test]
fn selectors_saturate_on_out_of_range_snapshots() {
    // Amounts this large only arrive through a hand-edited snapshot.
    let state = FinanceState {
        selected_month: mk("2026-02"),
        spending_budget: dec("0.5"),
        expenses: vec![
            expense("Art", "50000000000000000000000000000", "2026-02-01"),
            expense("Art", "50000000000000000000000000000", "2026-02-02"),
        ],
        ..Default::default()
    };
    assert_eq!(spent_for_month(&state, mk("2026-02")), Decimal::MAX);
    assert_eq!(lifetime_spent(&state), Decimal::MAX);
    let totals = category_totals(&state, mk("2026-02"));
    assert_eq!(totals[0].amount, Decimal::MAX);
    assert_eq!(totals[0].percentage, dec("100"));
    let summary = budget_summary(&state, mk("2026-02"));
    assert_eq!(summary.spent, Decimal::MAX);
    assert_eq!(summary.percent_used, Decimal::MAX);

    let single = FinanceState {
        expenses: vec![expense("Art", "1000000000000000000000000000", "2026-02-01")],
        ..state
    };
    let summary = budget_summary(&single, mk("2026-02"));
    assert_eq!(summary.spent, dec("1000000000000000000000000000"));
    assert_eq!(summary.percent_used, Decimal::MAX);
    assert_eq!(monthly_spending(&single, mk("2026-02"), 3).len(), 3);
}

#[test]
fn carry_forward_switches_between_window_and_lifetime() {
    let mut state = FinanceState {
        selected_month: mk("2026-02"),
        dashboard_window: DashboardWindow::One,
        carry_forward_spending: true,
        carry_forward_savings: true,
        savings_budget: dec("400"),
        expenses: vec![
            expense("Old", "100", "2025-06-10"),
            expense("New", "20", "2026-02-10"),
        ],
        saving_goals: vec![goal("300", "2025-06-01"), goal("100", "2026-02-01")],
        ..Default::default()
    };
    assert_eq!(lifetime_spent(&state), dec("120"));
    assert_eq!(goals_in_scope(&state).len(), 2);
    assert_eq!(savings_summary(&state).total_saved, dec("400"));
    assert_eq!(savings_summary(&state).budget_progress, dec("100"));

    state.carry_forward_spending = false;
    state.carry_forward_savings = false;
    assert_eq!(expenses_in_scope(&state).len(), 1);
    assert_eq!(lifetime_spent(&state), dec("20"));
    assert_eq!(savings_summary(&state).total_saved, dec("100"));
    assert_eq!(savings_summary(&state).budget_progress, dec("25"));
}

#[test]
fn monthly_spending_is_zero_filled() {
    let state = february();
    let series = monthly_spending(&state, mk("2026-02"), 3);
    let amounts: Vec<Decimal> = series.iter().map(|s| s.amount).collect();
    assert_eq!(amounts, vec![Decimal::ZERO, Decimal::ZERO, dec("68.5")]);
    assert_eq!(series[0].month, mk("2025-12"));
}

#[test]
fn selectors_are_idempotent() {
    let state = february();
    assert_eq!(
        category_totals(&state, mk("2026-02")),
        category_totals(&state, mk("2026-02"))
    );
    assert_eq!(savings_summary(&state), savings_summary(&state));
}
