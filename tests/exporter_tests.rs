// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::{cli, commands::exporter, models::Transaction, session::Session, store::Store};
use serde_json::json;
use tempfile::tempdir;

fn export(session: &Session, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "fintrack", "--user", "alice", "export", "transactions", "--format", format, "--out", out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(session, export_m)
    } else {
        panic!("no export subcommand");
    }
}

fn seeded(dir: &std::path::Path) -> Session {
    let store = Store::open(Some(dir.to_path_buf())).unwrap();
    let mut session = Session::open(store, "alice").unwrap();
    for (day, desc, amt, cat) in [(9, "Corner Shop", "12.34", "Food"), (2, "Netflix", "9.99", "Subscriptions")] {
        session
            .add_transaction(Transaction::new(
                NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                desc,
                amt.parse().unwrap(),
                cat,
            ))
            .unwrap();
    }
    session
}

#[test]
fn export_transactions_streams_pretty_json() {
    let dir = tempdir().unwrap();
    let session = seeded(dir.path());
    let out_path = dir.path().join("export.json");
    export(&session, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"date": "2025-01-09", "description": "Corner Shop", "amount": "12.34", "category": "Food"},
            {"date": "2025-01-02", "description": "Netflix", "amount": "9.99", "category": "Subscriptions"}
        ])
    );
}

#[test]
fn export_csv_keeps_insertion_order() {
    let dir = tempdir().unwrap();
    let session = seeded(dir.path());
    let out_path = dir.path().join("spending_history.csv");
    export(&session, "CSV", &out_path.to_string_lossy()).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "Date,Description,Amount,Category\n\
         2025-01-09,Corner Shop,12.34,Food\n\
         2025-01-02,Netflix,9.99,Subscriptions\n"
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let session = seeded(dir.path());
    let out_path = dir.path().join("export.unknown");
    assert!(export(&session, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
