// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::write_transactions;
use crate::session::Session;
use anyhow::{bail, Result};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session, sub),
        _ => Ok(()),
    }
}

fn export_transactions(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let ledger = session.ledger();

    match fmt.as_str() {
        "csv" => {
            let file = BufWriter::new(File::create(out)?);
            write_transactions(file, ledger)?;
        }
        "json" => {
            let items: Vec<_> = ledger
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "description": t.description,
                        "amount": t.amount.to_string(),
                        "category": t.category,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    if ledger.is_empty() {
        println!("No data to export; wrote an empty file to {}", out);
    } else {
        println!("Exported {} transactions to {}", ledger.len(), out);
    }
    Ok(())
}
