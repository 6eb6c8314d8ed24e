// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::window::{dashboard_month_set, expenses_for_month, spent_for_month, window_months};
use crate::models::{Expense, FinanceState, Investment, SavingGoal};
use crate::month::MonthKey;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Saturating total. Amounts outside the validated range (a hand-edited
/// snapshot) pin the result at `Decimal::MAX` or `Decimal::MIN` instead of
/// overflowing.
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0. Saturates like
/// [`sum_amounts`].
pub fn share(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Spend per category for `month`, largest first. Equal amounts keep the
/// order in which their category first appeared in the ledger.
pub fn category_totals(state: &FinanceState, month: MonthKey) -> Vec<CategoryTotal> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();
    for expense in expenses_for_month(state, month) {
        match index_by_category.entry(expense.category.as_str()) {
            Entry::Occupied(entry) => {
                let slot = &mut totals[*entry.get()].1;
                *slot = slot.saturating_add(expense.amount);
            }
            Entry::Vacant(entry) => {
                entry.insert(totals.len());
                totals.push((expense.category.clone(), expense.amount));
            }
        }
    }
    let total = sum_amounts(totals.iter().map(|(_, amount)| *amount));
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            percentage: share(amount, total),
            category,
            amount,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSpend {
    pub month: MonthKey,
    pub amount: Decimal,
}

/// One entry per month of the window, zero-filled.
pub fn monthly_spending(state: &FinanceState, anchor: MonthKey, size: usize) -> Vec<MonthSpend> {
    window_months(anchor, size)
        .into_iter()
        .map(|month| MonthSpend {
            month,
            amount: spent_for_month(state, month),
        })
        .collect()
}

pub fn spent_in_category(state: &FinanceState, month: MonthKey, category: &str) -> Decimal {
    sum_amounts(
        expenses_for_month(state, month)
            .filter(|e| e.category == category)
            .map(|e| e.amount),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_limit: bool,
}

/// One row per configured category limit.
pub fn limit_statuses(state: &FinanceState, month: MonthKey) -> Vec<LimitStatus> {
    state
        .category_limits
        .iter()
        .map(|(category, limit)| {
            let spent = spent_in_category(state, month, category);
            LimitStatus {
                category: category.clone(),
                limit: *limit,
                spent,
                remaining: limit.saturating_sub(spent),
                over_limit: spent > *limit,
            }
        })
        .collect()
}

pub fn is_over_limit(state: &FinanceState, month: MonthKey, category: &str) -> bool {
    state
        .category_limits
        .get(category)
        .is_some_and(|limit| spent_in_category(state, month, category) > *limit)
}

pub fn over_limit_count(state: &FinanceState, month: MonthKey) -> usize {
    limit_statuses(state, month)
        .iter()
        .filter(|s| s.over_limit)
        .count()
}

pub fn budget_for_month(state: &FinanceState, month: MonthKey) -> Decimal {
    state
        .monthly_budgets
        .get(&month)
        .copied()
        .unwrap_or(state.spending_budget)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub month: MonthKey,
    pub budget: Decimal,
    pub spent: Decimal,
    pub left: Decimal,
    pub percent_used: Decimal,
}

pub fn budget_summary(state: &FinanceState, month: MonthKey) -> BudgetSummary {
    let budget = budget_for_month(state, month);
    let spent = spent_for_month(state, month);
    BudgetSummary {
        month,
        budget,
        spent,
        left: budget.saturating_sub(spent),
        percent_used: share(spent, budget),
    }
}

/// Expenses counted toward lifetime spending: everything when spending
/// carry-forward is on, otherwise only the dashboard window.
pub fn expenses_in_scope(state: &FinanceState) -> Vec<&Expense> {
    if state.carry_forward_spending {
        return state.expenses.iter().collect();
    }
    let months = dashboard_month_set(state);
    state
        .expenses
        .iter()
        .filter(|e| months.contains(&e.month()))
        .collect()
}

pub fn goals_in_scope(state: &FinanceState) -> Vec<&SavingGoal> {
    if state.carry_forward_savings {
        return state.saving_goals.iter().collect();
    }
    let months = dashboard_month_set(state);
    state
        .saving_goals
        .iter()
        .filter(|g| months.contains(&g.month()))
        .collect()
}

pub fn investments_in_scope(state: &FinanceState) -> Vec<&Investment> {
    if state.carry_forward_savings {
        return state.investments.iter().collect();
    }
    let months = dashboard_month_set(state);
    state
        .investments
        .iter()
        .filter(|i| months.contains(&i.month()))
        .collect()
}

pub fn lifetime_spent(state: &FinanceState) -> Decimal {
    sum_amounts(expenses_in_scope(state).iter().map(|e| e.amount))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub total_saved: Decimal,
    pub total_target: Decimal,
    pub total_invested: Decimal,
    pub savings_budget: Decimal,
    pub budget_progress: Decimal,
    pub goals_completed: usize,
    pub goal_count: usize,
}

pub fn savings_summary(state: &FinanceState) -> SavingsSummary {
    let goals = goals_in_scope(state);
    let total_saved = sum_amounts(goals.iter().map(|g| g.saved_amount));
    let total_target = sum_amounts(goals.iter().map(|g| g.target_amount));
    let total_invested = sum_amounts(investments_in_scope(state).iter().map(|i| i.amount));
    SavingsSummary {
        total_saved,
        total_target,
        total_invested,
        savings_budget: state.savings_budget,
        budget_progress: share(total_saved, state.savings_budget),
        goals_completed: goals
            .iter()
            .filter(|g| g.saved_amount >= g.target_amount)
            .count(),
        goal_count: goals.len(),
    }
}
