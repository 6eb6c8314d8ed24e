// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Receivable (money lent) and liability (personal loan / EMI) math.

use super::aggregate::sum_amounts;
use crate::models::{FinanceState, Loan, PersonalLoan};
use crate::month::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Repaid portion of a receivable. A loan flagged `repaid` counts as fully repaid.
pub fn effective_repaid(loan: &Loan) -> Decimal {
    if loan.repaid {
        loan.amount
    } else {
        loan.repaid_amount.min(loan.amount)
    }
}

pub fn receivable_outstanding(loan: &Loan) -> Decimal {
    loan.amount
        .saturating_sub(effective_repaid(loan))
        .max(Decimal::ZERO)
}

/// Due month strictly before `current` and not marked repaid.
pub fn is_overdue(loan: &Loan, current: MonthKey) -> bool {
    !loan.repaid && loan.due_month.is_some_and(|due| due < current)
}

pub fn overdue_loans(state: &FinanceState, today: NaiveDate) -> Vec<&Loan> {
    let current = MonthKey::from_date(today);
    state
        .loans
        .iter()
        .filter(|l| is_overdue(l, current))
        .collect()
}

pub fn total_receivable_outstanding(state: &FinanceState) -> Decimal {
    sum_amounts(state.loans.iter().map(receivable_outstanding))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingSummary {
    pub total_lent: Decimal,
    pub total_repaid: Decimal,
    pub outstanding: Decimal,
    pub open_count: usize,
    pub overdue_count: usize,
}

/// Lending totals are never windowed.
pub fn lending_summary(state: &FinanceState, today: NaiveDate) -> LendingSummary {
    LendingSummary {
        total_lent: sum_amounts(state.loans.iter().map(|l| l.amount)),
        total_repaid: sum_amounts(state.loans.iter().map(effective_repaid)),
        outstanding: total_receivable_outstanding(state),
        open_count: state
            .loans
            .iter()
            .filter(|l| receivable_outstanding(l) > Decimal::ZERO)
            .count(),
        overdue_count: overdue_loans(state, today).len(),
    }
}

/// What is still owed on a personal loan.
///
/// Closed loans owe nothing. Otherwise the base is `outstanding_amount` when it
/// is positive, else `total_loan_amount`, less every recorded payment, floored at 0.
pub fn personal_outstanding(loan: &PersonalLoan) -> Decimal {
    if loan.closed {
        return Decimal::ZERO;
    }
    let base = match loan.outstanding_amount {
        Some(outstanding) if outstanding > Decimal::ZERO => outstanding,
        _ => loan.total_loan_amount.unwrap_or(Decimal::ZERO),
    };
    let paid = sum_amounts(loan.payments.iter().map(|p| p.amount));
    base.saturating_sub(paid).max(Decimal::ZERO)
}

pub fn total_personal_outstanding(state: &FinanceState) -> Decimal {
    sum_amounts(state.personal_loans.iter().map(personal_outstanding))
}

pub fn total_monthly_emi_due(state: &FinanceState) -> Decimal {
    sum_amounts(
        state
            .personal_loans
            .iter()
            .filter(|l| !l.closed)
            .filter_map(|l| l.emi_amount),
    )
}

fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Open loans whose next EMI falls between today and `threshold_days` from
/// now, both ends inclusive. Already-overdue EMIs are not included.
pub fn due_soon_personal_loans(
    state: &FinanceState,
    today: NaiveDate,
    threshold_days: i64,
) -> Vec<&PersonalLoan> {
    state
        .personal_loans
        .iter()
        .filter(|l| !l.closed)
        .filter(|l| {
            l.next_emi_date
                .is_some_and(|d| (0..=threshold_days).contains(&days_until(d, today)))
        })
        .collect()
}

/// Open loans whose next EMI date has already passed.
pub fn overdue_personal_loans(state: &FinanceState, today: NaiveDate) -> Vec<&PersonalLoan> {
    state
        .personal_loans
        .iter()
        .filter(|l| !l.closed && l.next_emi_date.is_some_and(|d| d < today))
        .collect()
}
