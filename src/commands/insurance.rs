// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional, required};
use crate::models::InsuranceDraft;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_id, short_id};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(store: &mut Store, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = InsuranceDraft {
                provider_name: required(sub, "provider")?.to_string(),
                plan_name: required(sub, "plan")?.to_string(),
                monthly_amount: decimal_arg(sub, "amount")?,
                due_date: parse_date(required(sub, "due")?)?,
                note: optional(sub, "note").map(str::to_string),
            };
            let id = store.add_insurance(draft)?;
            println!("Added policy {}", short_id(&id));
        }
        Some(("list", sub)) => {
            let state = store.state();
            if !maybe_print_json(sub.get_flag("json"), &state.life_insurance)? {
                let data = state
                    .life_insurance
                    .iter()
                    .map(|p| {
                        let status = if p.paid {
                            "paid"
                        } else if p.due_date < today {
                            "overdue"
                        } else {
                            "due"
                        };
                        vec![
                            short_id(&p.id),
                            p.provider_name.clone(),
                            p.plan_name.clone(),
                            fmt_money(&p.monthly_amount, state.currency),
                            p.due_date.to_string(),
                            status.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Provider", "Plan", "Monthly", "Due", "Status"], data)
                );
            }
        }
        Some(("toggle", sub)) => {
            let id = resolve_id(&store.state().life_insurance, required(sub, "id")?)?;
            store.toggle_insurance_paid(id)?;
            let paid = store
                .state()
                .life_insurance
                .iter()
                .any(|p| p.id == id && p.paid);
            println!(
                "Policy {} marked {}",
                short_id(&id),
                if paid { "paid" } else { "unpaid" }
            );
        }
        Some(("rm", sub)) => {
            let id = resolve_id(&store.state().life_insurance, required(sub, "id")?)?;
            store.delete_insurance(id)?;
            println!("Removed policy {}", short_id(&id));
        }
        _ => {}
    }
    Ok(())
}
