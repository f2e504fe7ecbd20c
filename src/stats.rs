// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, YearMonth};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total spent per distinct month, oldest first.
pub fn monthly_totals(ledger: &[Transaction]) -> BTreeMap<YearMonth, Decimal> {
    let mut map = BTreeMap::new();
    for tx in ledger {
        *map.entry(tx.month()).or_insert(Decimal::ZERO) += tx.amount;
    }
    map
}

pub fn spent_in_month(ledger: &[Transaction], month: YearMonth) -> Decimal {
    ledger
        .iter()
        .filter(|tx| month.contains(tx.date))
        .map(|tx| tx.amount)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Budget is zero or negative; no progress is reported.
    Unset { spent: Decimal },
    Under { spent: Decimal, budget: Decimal },
    Over { spent: Decimal, budget: Decimal },
}

impl BudgetStatus {
    /// Share of the budget used, capped at 1.0.
    pub fn progress(&self) -> Option<f64> {
        match *self {
            BudgetStatus::Unset { .. } => None,
            BudgetStatus::Under { spent, budget } | BudgetStatus::Over { spent, budget } => {
                // overflow only happens for tiny budgets, where the bar is full anyway
                let ratio = spent
                    .checked_div(budget)
                    .and_then(|r| r.to_f64())
                    .unwrap_or(1.0);
                Some(ratio.min(1.0))
            }
        }
    }

    pub fn spent(&self) -> Decimal {
        match *self {
            BudgetStatus::Unset { spent }
            | BudgetStatus::Under { spent, .. }
            | BudgetStatus::Over { spent, .. } => spent,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, BudgetStatus::Over { .. })
    }
}

pub fn budget_status(spent: Decimal, budget: Decimal) -> BudgetStatus {
    if budget <= Decimal::ZERO {
        BudgetStatus::Unset { spent }
    } else if spent > budget {
        BudgetStatus::Over { spent, budget }
    } else {
        BudgetStatus::Under { spent, budget }
    }
}

/// Total spend divided by the number of distinct months; zero for an empty ledger.
pub fn monthly_average(ledger: &[Transaction]) -> Decimal {
    let months = monthly_totals(ledger);
    if months.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = months.values().copied().sum();
    total / Decimal::from(months.len())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percent: f64,
}

/// Per-category totals, largest first. Equal totals keep category name order.
pub fn category_totals<'a, I>(rows: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut map: BTreeMap<&str, Decimal> = BTreeMap::new();
    for tx in rows {
        *map.entry(tx.category.as_str()).or_insert(Decimal::ZERO) += tx.amount;
    }
    let mut items: Vec<(String, Decimal)> = map
        .into_iter()
        .map(|(c, a)| (c.to_string(), a))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

pub fn top_category(ledger: &[Transaction]) -> Option<(String, Decimal)> {
    category_totals(ledger).into_iter().next()
}

pub fn category_breakdown(ledger: &[Transaction], month: YearMonth) -> Vec<CategoryShare> {
    let items = category_totals(ledger.iter().filter(|tx| month.contains(tx.date)));
    let total: Decimal = items.iter().map(|(_, a)| *a).sum();
    items
        .into_iter()
        .map(|(category, amount)| {
            let percent = if total.is_zero() {
                0.0
            } else {
                (amount / total * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or_default()
            };
            CategoryShare {
                category,
                amount,
                percent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    More,
    Less,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: YearMonth,
    pub month_total: Decimal,
    pub compared: YearMonth,
    pub compared_total: Decimal,
    /// `month_total - compared_total`.
    pub diff: Decimal,
    pub trend: Trend,
}

pub fn compare_months(
    ledger: &[Transaction],
    month: YearMonth,
    compared: YearMonth,
) -> MonthComparison {
    let month_total = spent_in_month(ledger, month);
    let compared_total = spent_in_month(ledger, compared);
    let diff = month_total - compared_total;
    let trend = if diff > Decimal::ZERO {
        Trend::More
    } else if diff < Decimal::ZERO {
        Trend::Less
    } else {
        Trend::Equal
    };
    MonthComparison {
        month,
        month_total,
        compared,
        compared_total,
        diff,
        trend,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: YearMonth,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub months: Vec<MonthTotal>,
    pub total: Decimal,
    pub monthly_average: Decimal,
    pub top_category: Option<CategoryShare>,
    pub current_month: YearMonth,
    pub current_spent: Decimal,
    pub above_average: bool,
}

pub fn summarize(ledger: &[Transaction], current_month: YearMonth) -> Summary {
    let months: Vec<MonthTotal> = monthly_totals(ledger)
        .into_iter()
        .map(|(month, amount)| MonthTotal { month, amount })
        .collect();
    let total: Decimal = months.iter().map(|m| m.amount).sum();
    let monthly_average = monthly_average(ledger);
    let top_category = top_category(ledger).map(|(category, amount)| CategoryShare {
        percent: if total.is_zero() {
            0.0
        } else {
            (amount / total * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or_default()
        },
        category,
        amount,
    });
    let current_spent = spent_in_month(ledger, current_month);
    Summary {
        months,
        total,
        monthly_average,
        top_category,
        current_month,
        current_spent,
        above_average: current_spent > monthly_average,
    }
}
