// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, optional_decimal, required};
use crate::analytics::aggregate::is_over_limit;
use crate::models::{Expense, ExpenseDraft};
use crate::month::MonthKey;
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_month, pretty_table, resolve_id, short_id,
};
use anyhow::{Context, Result};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().expenses, required(sub, "id")?)?;
            store.delete_expense(id)?;
            println!("Removed expense {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = ExpenseDraft {
        name: required(sub, "name")?.to_string(),
        category: required(sub, "category")?.to_string(),
        amount: decimal_arg(sub, "amount")?,
        date: parse_date(required(sub, "date")?)?,
        icon: optional(sub, "icon").unwrap_or_default().to_string(),
        note: optional(sub, "note").map(str::to_string),
        recurring: sub.get_flag("recurring"),
    };
    let month = MonthKey::from_date(draft.date);
    let category = draft.category.trim().to_string();
    let id = store.add_expense(draft)?;
    println!("Added expense {}", short_id(&id));
    if is_over_limit(store.state(), month, &category) {
        println!("Warning: {} is over its limit for {}", category, month);
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let state = store.state();
    let mut rows: Vec<&Expense> = match optional(sub, "month") {
        Some(raw) => {
            let month = parse_month(raw)?;
            state.expenses.iter().filter(|e| e.month() == month).collect()
        }
        None => state.expenses.iter().collect(),
    };
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if maybe_print_json(sub.get_flag("json"), &rows)? {
        return Ok(());
    }
    let data = rows
        .iter()
        .map(|e| {
            vec![
                short_id(&e.id),
                e.date.to_string(),
                format!("{} {}", e.icon, e.name).trim().to_string(),
                e.category.clone(),
                fmt_money(&e.amount, state.currency),
                if e.recurring { "yes".into() } else { String::new() },
                e.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Name", "Category", "Amount", "Recurring", "Note"],
            data
        )
    );
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_id(&store.state().expenses, required(sub, "id")?)?;
    let current = store
        .state()
        .expenses
        .iter()
        .find(|e| e.id == id)
        .context("Expense vanished")?;
    let mut draft = ExpenseDraft::from(current);
    if let Some(name) = optional(sub, "name") {
        draft.name = name.to_string();
    }
    if let Some(category) = optional(sub, "category") {
        draft.category = category.to_string();
    }
    if let Some(amount) = optional_decimal(sub, "amount")? {
        draft.amount = amount;
    }
    if let Some(date) = optional(sub, "date") {
        draft.date = parse_date(date)?;
    }
    if let Some(icon) = optional(sub, "icon") {
        draft.icon = icon.to_string();
    }
    if let Some(note) = optional(sub, "note") {
        draft.note = Some(note.to_string());
    }
    if let Some(recurring) = sub.get_one::<bool>("recurring") {
        draft.recurring = *recurring;
    }
    store.update_expense(id, draft)?;
    println!("Updated expense {}", short_id(&id));
    Ok(())
}
