// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let added = session.add_category(name)?;
            println!("Added category '{}'", added);
        }
        Some(("list", sub)) => {
            let cats = &session.settings().categories;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), cats)? {
                let data = cats.iter().map(|c| vec![c.clone()]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
