// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod goals;
pub mod insurance;
pub mod investments;
pub mod lending;
pub mod liabilities;
pub mod recurring;
pub mod reports;
pub mod settings;

use crate::cli;
use crate::month::MonthKey;
use crate::store::Store;
use crate::utils::{parse_decimal, parse_month};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;

/// Commands usable before a currency has been chosen.
fn ungated(name: &str) -> bool {
    matches!(name, "currency" | "reset" | "doctor")
}

pub fn dispatch(store: &mut Store, matches: &ArgMatches, today: NaiveDate) -> Result<()> {
    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };
    if !ungated(name) {
        store.require_currency()?;
    }
    match name {
        "currency" => settings::currency(store, sub)?,
        "month" => settings::month(store, sub)?,
        "window" => settings::window(store, sub)?,
        "expense" => expenses::handle(store, sub)?,
        "goal" => goals::handle(store, sub)?,
        "invest" => investments::handle(store, sub)?,
        "lend" => lending::handle(store, sub, today)?,
        "liability" => liabilities::handle(store, sub, today)?,
        "insurance" => insurance::handle(store, sub, today)?,
        "recurring" => recurring::handle(store, sub)?,
        "budget" => budgets::handle(store, sub)?,
        "report" => reports::handle(store, sub, today)?,
        "export" => exporter::handle(store, sub)?,
        "doctor" => doctor::handle(store)?,
        "reset" => {
            store.reset_to_seed()?;
            println!("Tracker reset to the starter dataset");
        }
        _ => {}
    }
    Ok(())
}

pub(crate) fn required<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing required argument '{}'", name))
}

pub(crate) fn optional<'a>(m: &'a ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name).map(String::as_str)
}

pub(crate) fn decimal_arg(m: &ArgMatches, name: &str) -> Result<Decimal> {
    parse_decimal(required(m, name)?)
}

pub(crate) fn optional_decimal(m: &ArgMatches, name: &str) -> Result<Option<Decimal>> {
    optional(m, name).map(parse_decimal).transpose()
}

/// `--month` when given, otherwise the selected month.
pub(crate) fn month_or_selected(store: &Store, m: &ArgMatches) -> Result<MonthKey> {
    match optional(m, "month") {
        Some(raw) => parse_month(raw),
        None => Ok(store.state().selected_month),
    }
}
