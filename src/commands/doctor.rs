// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

/// `(issue, detail)` pairs describing inconsistencies between ledger and settings.
pub fn find_issues(session: &Session) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let settings = session.settings();

    // 1) Transactions whose category is no longer in the category list
    let mut orphans: BTreeMap<&str, usize> = BTreeMap::new();
    for tx in session.ledger() {
        if !settings.has_category(&tx.category) {
            *orphans.entry(tx.category.as_str()).or_default() += 1;
        }
    }
    for (cat, n) in orphans {
        rows.push(vec![
            "unknown_category".into(),
            format!("'{}' used by {} transaction(s)", cat, n),
        ]);
    }

    // 2) Category list entries repeated in a hand-edited settings file
    let mut seen = HashSet::new();
    for c in &settings.categories {
        if !seen.insert(c.as_str()) {
            rows.push(vec!["duplicate_category".into(), c.clone()]);
        }
    }

    // 3) Ledger rows skipped on load
    for row in session.skipped_rows() {
        rows.push(vec![
            "unreadable_row".into(),
            format!("line {}: {}", row.line, row.reason),
        ]);
    }

    // 4) Budget tracking switched off
    if settings.monthly_budget <= Decimal::ZERO {
        rows.push(vec!["budget_unset".into(), "monthly budget is 0".into()]);
    }
    rows
}

pub fn handle(session: &Session) -> Result<()> {
    let rows = find_issues(session);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
