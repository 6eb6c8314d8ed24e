// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, required};
use crate::analytics::loans::{effective_repaid, is_overdue, receivable_outstanding};
use crate::models::{Loan, LoanDraft};
use crate::month::MonthKey;
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_month, pretty_table, resolve_id, short_id,
};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(store: &mut Store, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = LoanDraft {
                person_name: required(sub, "person")?.to_string(),
                reason: optional(sub, "reason").unwrap_or_default().to_string(),
                amount: decimal_arg(sub, "amount")?,
                date: parse_date(required(sub, "date")?)?,
                due_month: optional(sub, "due").map(parse_month).transpose()?,
            };
            let id = store.add_loan(draft)?;
            println!("Recorded loan {}", short_id(&id));
        }
        Some(("list", sub)) => list(store, sub, today)?,
        Some(("repay", sub)) => {
            let id = resolve_id(&store.state().loans, required(sub, "id")?)?;
            store.add_repayment(id, decimal_arg(sub, "amount")?)?;
            report_balance(store, id);
        }
        Some(("toggle", sub)) => {
            let id = resolve_id(&store.state().loans, required(sub, "id")?)?;
            store.toggle_loan_repaid(id)?;
            report_balance(store, id);
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().loans, required(sub, "id")?)?;
            store.delete_loan(id)?;
            println!("Removed loan {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}

fn report_balance(store: &Store, id: uuid::Uuid) {
    let state = store.state();
    if let Some(loan) = state.loans.iter().find(|l| l.id == id) {
        println!(
            "{}: outstanding {}{}",
            loan.person_name,
            fmt_money(&receivable_outstanding(loan), state.currency),
            if loan.repaid { " (repaid)" } else { "" }
        );
    }
}

fn status(loan: &Loan, current: MonthKey) -> &'static str {
    if loan.repaid {
        "repaid"
    } else if is_overdue(loan, current) {
        "overdue"
    } else {
        "open"
    }
}

fn list(store: &Store, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let state = store.state();
    if maybe_print_json(sub.get_flag("json"), &state.loans)? {
        return Ok(());
    }
    let current = MonthKey::from_date(today);
    let ccy = state.currency;
    let data = state
        .loans
        .iter()
        .map(|l| {
            vec![
                short_id(&l.id),
                l.person_name.clone(),
                l.reason.clone(),
                fmt_money(&l.amount, ccy),
                fmt_money(&effective_repaid(l), ccy),
                fmt_money(&receivable_outstanding(l), ccy),
                l.due_month.map(|d| d.to_string()).unwrap_or_default(),
                status(l, current).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Person", "Reason", "Amount", "Repaid", "Outstanding", "Due", "Status"],
            data
        )
    );
    Ok(())
}
