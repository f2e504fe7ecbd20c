// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use anyhow::{Context, Result};
use std::fs::File;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(session, sub),
        _ => Ok(()),
    }
}

fn import_transactions(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let outcome = session
        .import_csv(file)
        .with_context(|| format!("Import failed for {}", path))?;
    println!(
        "File was imported! {} rows read, {} added, {} duplicates skipped",
        outcome.read, outcome.added, outcome.duplicates
    );
    Ok(())
}
