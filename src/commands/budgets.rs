// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_arg, optional_decimal, required};
use crate::store::Store;
use crate::utils::parse_month;
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => {
            let amount = decimal_arg(sub, "amount")?;
            store.set_spending_budget(amount)?;
            println!("Spending budget set to {}", amount);
        }
        Some(("savings", sub)) => {
            let amount = decimal_arg(sub, "amount")?;
            store.set_savings_budget(amount)?;
            println!("Savings budget set to {}", amount);
        }
        Some(("month", sub)) => {
            let month = parse_month(required(sub, "month")?)?;
            let amount = if sub.get_flag("clear") {
                None
            } else {
                optional_decimal(sub, "amount")?
            };
            store.set_month_budget(month, amount)?;
            match amount {
                Some(a) => println!("Budget for {} set to {}", month, a),
                None => println!("Budget for {} now follows the spending budget", month),
            }
        }
        Some(("limit", sub)) => {
            let category = required(sub, "category")?;
            let amount = decimal_arg(sub, "amount")?;
            store.set_category_limit(category, amount)?;
            println!("Limit for {} set to {}", category.trim(), amount);
        }
        Some(("unlimit", sub)) => {
            let category = required(sub, "category")?;
            store.clear_category_limit(category)?;
            println!("Limit for {} removed", category.trim());
        }
        Some(("carry", sub)) => {
            if let Some(on) = sub.get_one::<bool>("spending") {
                store.set_carry_forward_spending(*on)?;
            }
            if let Some(on) = sub.get_one::<bool>("savings") {
                store.set_carry_forward_savings(*on)?;
            }
            let state = store.state();
            println!(
                "Carry forward: spending {}, savings {}",
                on_off(state.carry_forward_spending),
                on_off(state.carry_forward_savings)
            );
        }
        Some(("adjust", sub)) => {
            let mut adjustments = store.state().adjustments.clone();
            if let Some(v) = optional_decimal(sub, "assets")? {
                adjustments.manual_assets = v;
            }
            if let Some(v) = optional_decimal(sub, "liabilities")? {
                adjustments.manual_liabilities = v;
            }
            if let Some(v) = optional_decimal(sub, "essential")? {
                adjustments.essential_monthly_expense = v;
            }
            if let Some(v) = sub.get_one::<u32>("target-months") {
                adjustments.emergency_target_months = *v;
            }
            store.set_adjustments(adjustments)?;
            println!("Adjustments saved");
        }
        _ => {}
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
