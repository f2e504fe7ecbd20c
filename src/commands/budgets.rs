// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::YearMonth;
use crate::session::Session;
use crate::stats::{budget_status, spent_in_month, BudgetStatus};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, progress_bar};
use anyhow::Result;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("show", sub)) => show(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    session.set_budget(amount)?;
    println!("Monthly budget set to {}", fmt_money(&amount));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetReport {
    pub month: YearMonth,
    #[serde(flatten)]
    pub status: BudgetStatus,
    pub progress: Option<f64>,
}

pub fn report(session: &Session, month: YearMonth) -> BudgetReport {
    let spent = spent_in_month(session.ledger(), month);
    let status = budget_status(spent, session.settings().monthly_budget);
    BudgetReport {
        month,
        status,
        progress: status.progress(),
    }
}

fn show(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => s.parse::<YearMonth>()?,
        None => YearMonth::current(),
    };
    let r = report(session, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }

    println!("Monthly budget progress for {}", month);
    match r.status {
        BudgetStatus::Unset { spent } => {
            println!(
                "Spent {}. Set a budget with `budget set <AMOUNT>` to see progress.",
                fmt_money(&spent)
            );
        }
        BudgetStatus::Under { spent, budget } | BudgetStatus::Over { spent, budget } => {
            println!(
                "{} {} from {}",
                progress_bar(r.progress.unwrap_or_default(), 30),
                fmt_money(&spent),
                fmt_money(&budget)
            );
            if r.status.is_over() {
                println!("⚠️ You exceeded your budget by {}!", fmt_money(&(spent - budget)));
            }
        }
    }
    Ok(())
}
