// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Next-month spending forecast.
//!
//! Monthly totals are indexed 0, 1, 2, ... in chronological order and a
//! straight line is fitted through them by ordinary least squares. The
//! forecast is that line evaluated one index past the last month. Skipped
//! calendar months do not consume an index.

use crate::models::{Transaction, YearMonth};
use crate::stats::monthly_totals;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Fewer distinct months than this gives no prediction.
pub const MIN_MONTHS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Forecast {
    Predicted {
        month: YearMonth,
        amount: f64,
        slope: f64,
        intercept: f64,
        months_used: usize,
    },
    InsufficientData {
        months: usize,
    },
}

impl Forecast {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Forecast::Predicted { amount, .. } => Some(*amount),
            Forecast::InsufficientData { .. } => None,
        }
    }
}

/// Least-squares `(slope, intercept)` for `y = slope * x + intercept`.
/// `None` when fewer than two points or all `x` are equal.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

pub fn predict_next_month(ledger: &[Transaction]) -> Forecast {
    let totals = monthly_totals(ledger);
    if totals.len() < MIN_MONTHS {
        return Forecast::InsufficientData {
            months: totals.len(),
        };
    }
    let points: Vec<(f64, f64)> = totals
        .values()
        .enumerate()
        .map(|(i, total)| (i as f64, total.to_f64().unwrap_or_default()))
        .collect();
    let Some((slope, intercept)) = linear_fit(&points) else {
        return Forecast::InsufficientData {
            months: totals.len(),
        };
    };
    // at least MIN_MONTHS entries, so a last key exists
    let last = totals.keys().next_back().copied().unwrap_or_else(YearMonth::current);
    let next_index = points.len() as f64;
    Forecast::Predicted {
        month: last.next(),
        amount: slope * next_index + intercept,
        slope,
        intercept,
        months_used: points.len(),
    }
}
