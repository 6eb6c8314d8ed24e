// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-way export dump. Nothing here is read back by the store.

use crate::analytics::aggregate::{budget_for_month, lifetime_spent, sum_amounts};
use crate::analytics::loans::total_receivable_outstanding;
use crate::models::{Currency, Expense, FinanceState, Loan, SavingGoal};
use crate::month::MonthKey;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTotals {
    pub currency: Option<Currency>,
    pub selected_month: MonthKey,
    pub budget: Decimal,
    pub spending_budget: Decimal,
    pub savings_budget: Decimal,
    pub total_spent: Decimal,
    pub total_saved: Decimal,
    pub total_target: Decimal,
    pub total_lent: Decimal,
    pub outstanding: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub exported_at: DateTime<Utc>,
    pub totals: ExportTotals,
    pub expenses: &'a [Expense],
    pub saving_goals: &'a [SavingGoal],
    pub loans: &'a [Loan],
}

pub fn export_totals(state: &FinanceState) -> ExportTotals {
    ExportTotals {
        currency: state.currency,
        selected_month: state.selected_month,
        budget: budget_for_month(state, state.selected_month),
        spending_budget: state.spending_budget,
        savings_budget: state.savings_budget,
        total_spent: lifetime_spent(state),
        total_saved: sum_amounts(state.saving_goals.iter().map(|g| g.saved_amount)),
        total_target: sum_amounts(state.saving_goals.iter().map(|g| g.target_amount)),
        total_lent: sum_amounts(state.loans.iter().map(|l| l.amount)),
        outstanding: total_receivable_outstanding(state),
    }
}

pub fn build_export(state: &FinanceState, now: DateTime<Utc>) -> ExportDocument<'_> {
    ExportDocument {
        exported_at: now,
        totals: export_totals(state),
        expenses: &state.expenses,
        saving_goals: &state.saving_goals,
        loans: &state.loans,
    }
}

/// Writes the expense ledger as CSV, oldest first.
pub fn write_expenses_csv<W: Write>(state: &FinanceState, out: W) -> Result<()> {
    let mut rows: Vec<&Expense> = state.expenses.iter().collect();
    rows.sort_by_key(|e| e.date);
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "id", "date", "name", "category", "amount", "recurring", "note",
    ])?;
    for e in rows {
        wtr.write_record([
            e.id.to_string(),
            e.date.to_string(),
            e.name.clone(),
            e.category.clone(),
            e.amount.round_dp(2).to_string(),
            e.recurring.to_string(),
            e.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
