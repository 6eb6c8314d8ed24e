// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, required};
use crate::models::InvestmentDraft;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_id, short_id};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = InvestmentDraft {
                title: required(sub, "title")?.to_string(),
                category: required(sub, "category")?.to_string(),
                amount: decimal_arg(sub, "amount")?,
                date: parse_date(required(sub, "date")?)?,
                note: optional(sub, "note").map(str::to_string),
            };
            let id = store.add_investment(draft)?;
            println!("Added investment {}", short_id(&id));
        }
        Some(("list", sub)) => {
            let state = store.state();
            if !maybe_print_json(sub.get_flag("json"), &state.investments)? {
                let data = state
                    .investments
                    .iter()
                    .map(|i| {
                        vec![
                            short_id(&i.id),
                            i.date.to_string(),
                            i.title.clone(),
                            i.category.clone(),
                            fmt_money(&i.amount, state.currency),
                            i.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Date", "Title", "Category", "Amount", "Note"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().investments, required(sub, "id")?)?;
            store.delete_investment(id)?;
            println!("Removed investment {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}
