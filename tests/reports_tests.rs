// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{
    commands::{
        doctor,
        reports::{month_report, resolve_months},
    },
    models::YearMonth,
    session::Session,
    stats::{spent_in_month, summarize, Trend},
    store::Store,
};
use rust_decimal::Decimal;
use tempfile::tempdir;

const HISTORY: &str = "Date,Description,Amount,Category\n\
2025-01-03,Rent,900,Rent\n\
2025-01-10,Market,120,Food\n\
2025-03-02,Rent,900,Rent\n\
2025-03-05,Market,80,Food\n\
2025-03-06,Train,20,Transport\n\
2025-04-01,Market,50,Food\n";

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn session() -> (tempfile::TempDir, Session) {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("ivan_data.csv"), HISTORY).unwrap();
    let session = Session::open(Store::open(Some(dir.path().to_path_buf())).unwrap(), "ivan").unwrap();
    (dir, session)
}

#[test]
fn default_months_are_latest_two_with_data() {
    let (_dir, session) = session();
    assert_eq!(
        resolve_months(&session, None, None),
        Some((ym("2025-04"), ym("2025-03")))
    );
    assert_eq!(
        resolve_months(&session, Some(ym("2025-03")), None),
        Some((ym("2025-03"), ym("2025-01")))
    );
    assert_eq!(
        resolve_months(&session, Some(ym("2025-01")), None),
        Some((ym("2025-01"), ym("2025-01")))
    );
}

#[test]
fn no_months_without_data() {
    let dir = tempdir().unwrap();
    let empty = Session::open(Store::open(Some(dir.path().to_path_buf())).unwrap(), "ivan").unwrap();
    assert_eq!(resolve_months(&empty, None, None), None);
}

#[test]
fn month_report_breaks_down_and_compares() {
    let (_dir, session) = session();
    let report = month_report(&session, ym("2025-03"), ym("2025-01"));
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Food", "Transport"]);
    assert!((report.categories[0].percent - 90.0).abs() < 1e-9);
    assert_eq!(report.comparison.diff, Decimal::from(-20));
    assert_eq!(report.comparison.trend, Trend::Less);
}

#[test]
fn stats_summary_over_history() {
    let (_dir, session) = session();
    let s = summarize(session.ledger(), ym("2025-04"));
    let months: Vec<String> = s.months.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2025-03", "2025-04"]);
    assert_eq!(s.total, Decimal::from(2070));
    assert_eq!(s.monthly_average, Decimal::from(690));
    assert_eq!(s.top_category.as_ref().unwrap().category, "Rent");
    assert_eq!(s.current_spent, Decimal::from(50));
    assert!(!s.above_average);
}

#[test]
fn unreadable_ledger_row_is_skipped_and_reported() {
    let dir = tempdir().unwrap();
    let mut data = HISTORY.to_string();
    data.push_str("NaT,Broken,4,Food\n");
    std::fs::write(dir.path().join("ivan_data.csv"), data).unwrap();

    let session = Session::open(Store::open(Some(dir.path().to_path_buf())).unwrap(), "ivan").unwrap();
    assert_eq!(session.ledger().len(), 6);
    assert_eq!(session.skipped_rows().len(), 1);
    assert_eq!(session.skipped_rows()[0].line, 8);

    assert_eq!(spent_in_month(session.ledger(), ym("2025-04")), Decimal::from(50));
    assert_eq!(summarize(session.ledger(), ym("2025-04")).total, Decimal::from(2070));

    let issues = doctor::find_issues(&session);
    let unreadable: Vec<&Vec<String>> = issues.iter().filter(|r| r[0] == "unreadable_row").collect();
    assert_eq!(unreadable.len(), 1);
    assert!(unreadable[0][1].starts_with("line 8:"));
}
