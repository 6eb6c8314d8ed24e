// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::aggregate::sum_amounts;
use crate::models::FinanceState;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Integrity findings as (issue, detail) pairs.
pub fn diagnose(state: &FinanceState) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    if state.currency.is_none() {
        rows.push(("currency_not_chosen".into(), "Pick one with `currency set`".into()));
    }

    // 1) Receivables
    for loan in &state.loans {
        if loan.repaid_amount > loan.amount {
            rows.push((
                "receivable_overpaid".into(),
                format!("{}: repaid {} of {}", loan.person_name, loan.repaid_amount, loan.amount),
            ));
        } else if !loan.repaid && loan.repaid_amount == loan.amount {
            rows.push((
                "receivable_settled_not_flagged".into(),
                format!("{}: fully repaid but still marked pending", loan.person_name),
            ));
        }
    }

    // 2) Personal loans
    for loan in &state.personal_loans {
        let paid = sum_amounts(loan.payments.iter().map(|p| p.amount));
        let base = loan
            .outstanding_amount
            .filter(|o| *o > Decimal::ZERO)
            .or(loan.total_loan_amount);
        match base {
            None => rows.push((
                "liability_without_balance".into(),
                format!("{}: no total or outstanding amount", loan.lender_name),
            )),
            Some(base) if paid > base => rows.push((
                "payments_exceed_loan".into(),
                format!("{}: paid {} against {}", loan.lender_name, paid, base),
            )),
            _ => {}
        }
    }

    // 3) Limits nobody spends against
    let used: HashSet<&str> = state.expenses.iter().map(|e| e.category.as_str()).collect();
    for category in state.category_limits.keys() {
        if !used.contains(category.as_str()) {
            rows.push(("unused_category_limit".into(), category.clone()));
        }
    }
    rows
}

pub fn handle(store: &Store) -> Result<()> {
    let rows: Vec<Vec<String>> = diagnose(store.state())
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
