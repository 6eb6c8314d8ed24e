// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed bill tiles and ledger expenses flagged recurring are separate
//! obligations; their monthly totals add up rather than deduplicate.

use super::aggregate::sum_amounts;
use super::window::expenses_for_month;
use crate::models::{FinanceState, RecurringTemplate};
use crate::month::MonthKey;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn is_paid_for(template: &RecurringTemplate, month: MonthKey) -> bool {
    template.paid_months.contains(&month)
}

/// Active templates marked paid for `month`.
pub fn templates_paid_total(state: &FinanceState, month: MonthKey) -> Decimal {
    sum_amounts(
        state
            .recurring_templates
            .iter()
            .filter(|t| t.active && is_paid_for(t, month))
            .map(|t| t.amount),
    )
}

/// Active templates still unpaid for `month`.
pub fn templates_pending_total(state: &FinanceState, month: MonthKey) -> Decimal {
    sum_amounts(
        state
            .recurring_templates
            .iter()
            .filter(|t| t.active && !is_paid_for(t, month))
            .map(|t| t.amount),
    )
}

pub fn ledger_recurring_total(state: &FinanceState, month: MonthKey) -> Decimal {
    sum_amounts(
        expenses_for_month(state, month)
            .filter(|e| e.recurring)
            .map(|e| e.amount),
    )
}

pub fn monthly_recurring_total(state: &FinanceState, month: MonthKey) -> Decimal {
    templates_paid_total(state, month).saturating_add(ledger_recurring_total(state, month))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSummary {
    pub month: MonthKey,
    pub templates_paid: Decimal,
    pub templates_pending: Decimal,
    pub ledger_flagged: Decimal,
    pub total: Decimal,
    pub active_templates: usize,
}

pub fn recurring_summary(state: &FinanceState, month: MonthKey) -> RecurringSummary {
    let templates_paid = templates_paid_total(state, month);
    let ledger_flagged = ledger_recurring_total(state, month);
    RecurringSummary {
        month,
        templates_paid,
        templates_pending: templates_pending_total(state, month),
        ledger_flagged,
        total: templates_paid.saturating_add(ledger_flagged),
        active_templates: state.recurring_templates.iter().filter(|t| t.active).count(),
    }
}
