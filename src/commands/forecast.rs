// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forecast::{predict_next_month, Forecast, MIN_MONTHS};
use crate::session::Session;
use crate::utils::maybe_print_json;
use anyhow::Result;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let forecast = predict_next_month(session.ledger());
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &forecast)? {
        return Ok(());
    }
    match forecast {
        Forecast::Predicted { month, amount, .. } => {
            println!("We predict you will spend {:.2} in {}", amount, month);
        }
        Forecast::InsufficientData { months } => {
            println!(
                "There is not enough data for a prediction: {} month(s) recorded, {} needed.",
                months, MIN_MONTHS
            );
        }
    }
    Ok(())
}
