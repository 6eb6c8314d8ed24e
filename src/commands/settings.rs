// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::models::{Currency, DashboardWindow};
use crate::store::Store;
use crate::utils::parse_month;
use anyhow::{Context, Result, anyhow};

pub fn currency(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let currency: Currency = required(sub, "code")?.parse().map_err(|e: String| anyhow!(e))?;
            store.set_currency(currency)?;
            println!("Currency set to {}", currency);
        }
        Some(("show", _)) => match store.state().currency {
            Some(c) => println!("{}", c),
            None => println!("No currency chosen yet (walletwise currency set <CODE>)"),
        },
        _ => {}
    }
    Ok(())
}

pub fn month(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let month = parse_month(required(sub, "month")?)?;
            store.set_selected_month(month)?;
            println!("Selected month is now {}", month);
        }
        Some(("show", _)) => println!("{}", store.state().selected_month),
        _ => {}
    }
    Ok(())
}

pub fn window(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let months: u8 = required(sub, "months")?
            .parse()
            .context("Window must be a number of months")?;
        let window = DashboardWindow::try_from(months).map_err(|e| anyhow!(e))?;
        store.set_dashboard_window(window)?;
        println!("Dashboard window set to {} month(s)", window.months());
    }
    Ok(())
}
