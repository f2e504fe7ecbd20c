// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{
    forecast::{predict_next_month, Forecast},
    session::Session,
    store::Store,
};
use tempfile::tempdir;

fn session_with(csv: &str) -> (tempfile::TempDir, Session) {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("hana_data.csv"), csv).unwrap();
    let store = Store::open(Some(dir.path().to_path_buf())).unwrap();
    let session = Session::open(store, "hana").unwrap();
    (dir, session)
}

#[test]
fn three_months_on_a_line_predict_the_fourth() {
    let (_dir, session) = session_with(
        "Date,Description,Amount,Category\n\
         2025-01-15,Groceries,100,Food\n\
         2025-02-15,Groceries,150,Food\n\
         2025-03-15,Groceries,200,Food\n",
    );
    match predict_next_month(session.ledger()) {
        Forecast::Predicted {
            month,
            amount,
            slope,
            intercept,
            ..
        } => {
            assert_eq!(month.to_string(), "2025-04");
            assert!((slope - 50.0).abs() < 1e-9);
            assert!((intercept - 100.0).abs() < 1e-9);
            assert!((amount - 250.0).abs() < 1e-9);
        }
        other => panic!("expected a prediction, got {other:?}"),
    }
}

#[test]
fn rows_in_the_same_month_are_summed_first() {
    let (_dir, session) = session_with(
        "Date,Description,Amount,Category\n\
         2025-03-01,a,60,Food\n\
         2025-01-01,b,100,Food\n\
         2025-03-30,c,140,Rent\n\
         2025-02-10,d,75,Food\n\
         2025-02-11,e,75,Food\n",
    );
    let amount = predict_next_month(session.ledger()).amount().unwrap();
    assert!((amount - 250.0).abs() < 1e-9);
}

#[test]
fn two_months_are_not_enough() {
    let (_dir, session) = session_with(
        "Date,Description,Amount,Category\n\
         2025-01-15,a,100,Food\n\
         2025-02-15,b,150,Food\n",
    );
    assert_eq!(
        predict_next_month(session.ledger()),
        Forecast::InsufficientData { months: 2 }
    );
}

#[test]
fn forecast_serializes_with_result_tag() {
    let value = serde_json::to_value(Forecast::InsufficientData { months: 1 }).unwrap();
    assert_eq!(value["result"], "insufficient_data");
    assert_eq!(value["months"], 1);
}
