// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, required};
use crate::models::GoalDraft;
use crate::store::Store;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_date, pretty_table, resolve_id, short_id,
};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = GoalDraft {
                name: required(sub, "name")?.to_string(),
                category: required(sub, "category")?.to_string(),
                target_amount: decimal_arg(sub, "target")?,
                saved_amount: decimal_arg(sub, "saved")?,
                date: parse_date(required(sub, "date")?)?,
                icon: optional(sub, "icon").unwrap_or_default().to_string(),
                emergency: sub.get_flag("emergency"),
            };
            let id = store.add_goal(draft)?;
            println!("Added goal {}", short_id(&id));
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("deposit", sub)) => {
            let id = resolve_id(&store.state().saving_goals, required(sub, "id")?)?;
            let amount = decimal_arg(sub, "amount")?;
            store.deposit_to_goal(id, amount)?;
            println!("Deposited {} into {}", amount, short_id(&id));
        }
        Some(("withdraw", sub)) => {
            let id = resolve_id(&store.state().saving_goals, required(sub, "id")?)?;
            let amount = decimal_arg(sub, "amount")?;
            store.withdraw_from_goal(id, amount)?;
            println!("Withdrew {} from {}", amount, short_id(&id));
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().saving_goals, required(sub, "id")?)?;
            store.delete_goal(id)?;
            println!("Removed goal {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let state = store.state();
    if maybe_print_json(sub.get_flag("json"), &state.saving_goals)? {
        return Ok(());
    }
    let ccy = state.currency;
    let data = state
        .saving_goals
        .iter()
        .map(|g| {
            vec![
                short_id(&g.id),
                format!("{} {}", g.icon, g.name).trim().to_string(),
                g.category.clone(),
                fmt_money(&g.saved_amount, ccy),
                fmt_money(&g.target_amount, ccy),
                fmt_percent(&g.progress_percent()),
                g.date.to_string(),
                if g.emergency { "yes".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Goal", "Category", "Saved", "Target", "Progress", "Deadline", "Emergency"],
            data
        )
    );
    Ok(())
}
