// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, month_or_selected, optional, required};
use crate::analytics::recurring::is_paid_for;
use crate::models::TemplateDraft;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, resolve_id, short_id};
use anyhow::{Context, Result};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = TemplateDraft {
                title: required(sub, "title")?.to_string(),
                category: required(sub, "category")?.to_string(),
                amount: decimal_arg(sub, "amount")?,
                icon: optional(sub, "icon").unwrap_or_default().to_string(),
            };
            let id = store.add_recurring_template(draft)?;
            println!("Added recurring bill {}", short_id(&id));
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("toggle", sub)) => {
            let id = resolve_id(&store.state().recurring_templates, required(sub, "id")?)?;
            let month = month_or_selected(store, sub)?;
            store.toggle_recurring_template_paid(id, month)?;
            let paid = store
                .state()
                .recurring_templates
                .iter()
                .any(|t| t.id == id && is_paid_for(t, month));
            println!(
                "{} {} for {}",
                short_id(&id),
                if paid { "paid" } else { "unpaid" },
                month
            );
        }
        Some(("active", sub)) => {
            let id = resolve_id(&store.state().recurring_templates, required(sub, "id")?)?;
            let active = *sub
                .get_one::<bool>("state")
                .context("Missing required argument 'state'")?;
            store.set_recurring_template_active(id, active)?;
            println!(
                "{} is now {}",
                short_id(&id),
                if active { "active" } else { "paused" }
            );
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().recurring_templates, required(sub, "id")?)?;
            store.delete_recurring_template(id)?;
            println!("Removed recurring bill {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let state = store.state();
    if maybe_print_json(sub.get_flag("json"), &state.recurring_templates)? {
        return Ok(());
    }
    let month = month_or_selected(store, sub)?;
    let paid_header = month.to_string();
    let data = state
        .recurring_templates
        .iter()
        .map(|t| {
            vec![
                short_id(&t.id),
                format!("{} {}", t.icon, t.title).trim().to_string(),
                t.category.clone(),
                fmt_money(&t.amount, state.currency),
                if t.active { "yes".into() } else { "no".into() },
                if is_paid_for(t, month) { "paid".into() } else { "unpaid".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Bill", "Category", "Amount", "Active", paid_header.as_str()],
            data
        )
    );
    Ok(())
}
