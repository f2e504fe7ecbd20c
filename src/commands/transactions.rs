// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, YearMonth};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("clear", sub)) => clear(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let category = sub.get_one::<String>("category").unwrap();

    session.add_transaction(Transaction::new(date, description.trim(), amount, category.trim()))?;
    println!(
        "Recorded {} on {} for '{}' ({})",
        fmt_money(&amount),
        date,
        description.trim(),
        category.trim()
    );
    Ok(())
}

fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

fn clear(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        println!("This deletes all history for {}; re-run with --yes", session.user());
        return Ok(());
    }
    let dropped = session.clear_history()?;
    println!("History was deleted ({} transactions).", dropped);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

/// Matching rows, newest first; equal dates list the later entry first.
pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<YearMonth>())
        .transpose()?;
    let category = sub.get_one::<String>("category");

    let mut selected: Vec<(usize, &Transaction)> = session
        .ledger()
        .iter()
        .enumerate()
        .filter(|(_, tx)| month.is_none_or(|m| m.contains(tx.date)))
        .filter(|(_, tx)| category.is_none_or(|c| &tx.category == c))
        .collect();
    selected.sort_by(|a, b| b.1.date.cmp(&a.1.date).then(b.0.cmp(&a.0)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        selected.truncate(*limit);
    }

    Ok(selected
        .into_iter()
        .map(|(_, tx)| TransactionRow {
            date: tx.date.to_string(),
            description: tx.description.clone(),
            amount: fmt_money(&tx.amount),
            category: tx.category.clone(),
        })
        .collect())
}
