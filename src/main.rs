// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use fintrack::{cli, commands, session::Session, store::Store, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    let user = matches
        .get_one::<String>("user")
        .context("No user given; pass --user NAME or set FINTRACK_USER")?;
    let store = Store::open(matches.get_one::<PathBuf>("data-dir").cloned())?;
    let mut session = Session::open(store, user)?;

    match name {
        "init" => {
            session.save_settings()?;
            println!("Hello, {}!", session.user());
            println!("Data directory: {}", session.store().root().display());
        }
        "tx" => commands::transactions::handle(&mut session, sub)?,
        "category" => commands::categories::handle(&mut session, sub)?,
        "budget" => commands::budgets::handle(&mut session, sub)?,
        "import" => commands::importer::handle(&mut session, sub)?,
        "export" => commands::exporter::handle(&session, sub)?,
        "report" => commands::reports::handle(&session, sub)?,
        "forecast" => commands::forecast::handle(&session, sub)?,
        "doctor" => commands::doctor::handle(&session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
