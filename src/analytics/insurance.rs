// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::aggregate::sum_amounts;
use crate::models::{FinanceState, LifeInsurance};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn total_monthly_premium(state: &FinanceState) -> Decimal {
    sum_amounts(state.life_insurance.iter().map(|p| p.monthly_amount))
}

pub fn unpaid_premium_total(state: &FinanceState) -> Decimal {
    sum_amounts(
        state
            .life_insurance
            .iter()
            .filter(|p| !p.paid)
            .map(|p| p.monthly_amount),
    )
}

/// Unpaid policies due within `threshold_days` (inclusive, not yet past due).
pub fn insurance_due_soon(
    state: &FinanceState,
    today: NaiveDate,
    threshold_days: i64,
) -> Vec<&LifeInsurance> {
    state
        .life_insurance
        .iter()
        .filter(|p| !p.paid && (0..=threshold_days).contains(&(p.due_date - today).num_days()))
        .collect()
}

pub fn overdue_insurance(state: &FinanceState, today: NaiveDate) -> Vec<&LifeInsurance> {
    state
        .life_insurance
        .iter()
        .filter(|p| !p.paid && p.due_date < today)
        .collect()
}
