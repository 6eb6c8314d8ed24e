// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, optional_decimal, required};
use crate::analytics::aggregate::sum_amounts;
use crate::analytics::loans::personal_outstanding;
use crate::models::{LoanType, PersonalLoan, PersonalLoanDraft};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_id, short_id};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;

pub fn handle(store: &mut Store, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub, today)?,
        Some(("pay", sub)) => {
            let id = resolve_id(&store.state().personal_loans, required(sub, "id")?)?;
            let date = match optional(sub, "date") {
                Some(raw) => parse_date(raw)?,
                None => today,
            };
            store.record_personal_loan_payment(id, decimal_arg(sub, "amount")?, date)?;
            let state = store.state();
            if let Some(loan) = state.personal_loans.iter().find(|l| l.id == id) {
                println!(
                    "{}: outstanding {}{}",
                    loan.lender_name,
                    fmt_money(&personal_outstanding(loan), state.currency),
                    if loan.closed { " (closed)" } else { "" }
                );
            }
        }
        Some(("close", sub)) => {
            let id = resolve_id(&store.state().personal_loans, required(sub, "id")?)?;
            store.toggle_personal_loan_closed(id)?;
            let closed = store
                .state()
                .personal_loans
                .iter()
                .any(|l| l.id == id && l.closed);
            println!(
                "Loan {} {}",
                short_id(&id),
                if closed { "closed" } else { "reopened" }
            );
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().personal_loans, required(sub, "id")?)?;
            store.delete_personal_loan(id)?;
            println!("Removed loan {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let loan_type: LoanType = required(sub, "type")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let draft = PersonalLoanDraft {
        lender_name: required(sub, "lender")?.to_string(),
        loan_type,
        custom_type_label: optional(sub, "label").map(str::to_string),
        start_date: parse_date(required(sub, "start")?)?,
        total_loan_amount: optional_decimal(sub, "total")?,
        outstanding_amount: optional_decimal(sub, "outstanding")?,
        emi_amount: optional_decimal(sub, "emi")?,
        emi_day_of_month: sub.get_one::<u32>("emi-day").copied(),
        next_emi_date: optional(sub, "next").map(parse_date).transpose()?,
        note: optional(sub, "note").map(str::to_string),
    };
    let id = store.add_personal_loan(draft)?;
    println!("Added loan {}", short_id(&id));
    Ok(())
}

fn status(loan: &PersonalLoan, today: NaiveDate) -> &'static str {
    match loan.next_emi_date {
        _ if loan.closed => "closed",
        Some(next) if next < today => "overdue",
        _ => "open",
    }
}

fn list(store: &Store, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let state = store.state();
    if maybe_print_json(sub.get_flag("json"), &state.personal_loans)? {
        return Ok(());
    }
    let ccy = state.currency;
    let data = state
        .personal_loans
        .iter()
        .map(|l| {
            let paid = sum_amounts(l.payments.iter().map(|p| p.amount));
            vec![
                short_id(&l.id),
                l.lender_name.clone(),
                l.type_label().to_string(),
                l.emi_amount
                    .map(|e| fmt_money(&e, ccy))
                    .unwrap_or_default(),
                l.next_emi_date.map(|d| d.to_string()).unwrap_or_default(),
                fmt_money(&paid, ccy),
                fmt_money(&personal_outstanding(l), ccy),
                status(l, today).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Lender", "Type", "EMI", "Next EMI", "Paid", "Outstanding", "Status"],
            data
        )
    );
    Ok(())
}
