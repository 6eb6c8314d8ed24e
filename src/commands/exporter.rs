// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::export::{build_export, write_expenses_csv};
use crate::store::Store;
use anyhow::{Context, Result};
use std::fs::File;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let out = required(sub, "out")?;
            let doc = build_export(store.state(), chrono::Utc::now());
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)
                .with_context(|| format!("Failed to write {}", out))?;
            println!("Exported tracker to {}", out);
        }
        Some(("csv", sub)) => {
            let out = required(sub, "out")?;
            let file = File::create(out).with_context(|| format!("Failed to create {}", out))?;
            write_expenses_csv(store.state(), file)?;
            println!("Exported expenses to {}", out);
        }
        _ => {}
    }
    Ok(())
}
