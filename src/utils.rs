// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Currency, Record};
use crate::month::MonthKey;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("walletwise=info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<MonthKey> {
    Ok(s.parse::<MonthKey>()?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: Option<Currency>) -> String {
    match ccy {
        Some(c) => format!("{} {:.2}", c, d.round_dp(2)),
        None => format!("{:.2}", d.round_dp(2)),
    }
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.2}%", d.round_dp(2))
}

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Finds the record whose id starts with `prefix` (hyphens ignored). The
/// prefix must match exactly one record.
pub fn resolve_id<T: Record>(items: &[T], prefix: &str) -> Result<Uuid> {
    let needle = prefix.trim().replace('-', "").to_lowercase();
    if needle.is_empty() {
        bail!("{} id must not be empty", T::KIND);
    }
    let mut hits = items
        .iter()
        .map(|r| r.id())
        .filter(|id| id.simple().to_string().starts_with(&needle));
    let first = hits
        .next()
        .ok_or_else(|| anyhow!("{} '{}' not found", T::KIND, prefix))?;
    if hits.next().is_some() {
        bail!("{} id '{}' is ambiguous, use more characters", T::KIND, prefix);
    }
    Ok(first)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
