// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use walletwise::{cli, commands, db, store::Store, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let slot = match matches.get_one::<String>("db") {
        Some(path) => db::SqliteSlot::open(Path::new(path))?,
        None => db::SqliteSlot::open_or_init()?,
    };
    let mut store = Store::open(Box::new(slot));
    let today = chrono::Local::now().date_naive();

    commands::dispatch(&mut store, &matches, today)
}
