// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::YearMonth;
use crate::session::Session;
use crate::stats::{
    category_breakdown, compare_months, monthly_totals, summarize, CategoryShare,
    MonthComparison, Trend,
};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => stats(session, sub)?,
        Some(("month", sub)) => month(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn stats(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let summary = summarize(session.ledger(), YearMonth::current());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    if summary.months.is_empty() {
        println!("There is no spending to report yet.");
        return Ok(());
    }

    let data = summary
        .months
        .iter()
        .map(|m| vec![m.month.to_string(), fmt_money(&m.amount)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], data));
    if let Some(top) = &summary.top_category {
        println!(
            "Most expensive category: {} with {} ({:.1}%)",
            top.category,
            fmt_money(&top.amount),
            top.percent
        );
    }
    println!("Monthly average: {}", fmt_money(&summary.monthly_average));
    if summary.above_average {
        println!(
            "⚠️ Spending this month ({}) is above the monthly average",
            fmt_money(&summary.current_spent)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub categories: Vec<CategoryShare>,
    pub comparison: MonthComparison,
}

/// Chosen month and comparison month. Without flags these are the latest
/// month with data and the one with data before it.
pub fn resolve_months(
    session: &Session,
    month: Option<YearMonth>,
    compare: Option<YearMonth>,
) -> Option<(YearMonth, YearMonth)> {
    let available: Vec<YearMonth> = monthly_totals(session.ledger()).into_keys().rev().collect();
    let month = month.or_else(|| available.first().copied())?;
    let compare = compare.unwrap_or_else(|| {
        available
            .iter()
            .copied()
            .find(|m| *m < month)
            .unwrap_or(month)
    });
    Some((month, compare))
}

pub fn month_report(session: &Session, month: YearMonth, compare: YearMonth) -> MonthReport {
    MonthReport {
        categories: category_breakdown(session.ledger(), month),
        comparison: compare_months(session.ledger(), month, compare),
    }
}

fn month(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<YearMonth>())
        .transpose()?;
    let compare = sub
        .get_one::<String>("compare")
        .map(|s| s.parse::<YearMonth>())
        .transpose()?;
    let Some((month, compare)) = resolve_months(session, month, compare) else {
        println!("No data");
        return Ok(());
    };
    let report = month_report(session, month, compare);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!("Spending by category for {}", month);
    let data = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.amount),
                format!("{:.2}%", c.percent),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], data));

    let cmp = &report.comparison;
    println!("Total spent in {}: {}", month, fmt_money(&cmp.month_total));
    match cmp.trend {
        Trend::More => println!(
            "❗ You spent {} more in {} than in {}.",
            fmt_money(&cmp.diff),
            cmp.month,
            cmp.compared
        ),
        Trend::Less => println!(
            "✅ You saved {} in {} compared to {}.",
            fmt_money(&-cmp.diff),
            cmp.month,
            cmp.compared
        ),
        Trend::Equal => println!("⚖️ The spending in {} and {} is equal.", cmp.month, cmp.compared),
    }
    Ok(())
}
