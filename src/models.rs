// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{Result, TrackerError};
use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Food", "Transport", "Rent", "Subscriptions", "Other"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: category.into(),
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_budget", with = "rust_decimal::serde::float")]
    pub monthly_budget: Decimal,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_budget() -> Decimal {
    Decimal::from(2000)
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monthly_budget: default_budget(),
            categories: default_categories(),
        }
    }
}

impl Settings {
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Appends a trimmed category name, rejecting blanks and names already present.
    pub fn add_category(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::BlankCategory);
        }
        if self.categories.iter().any(|c| c.trim() == name) {
            return Err(TrackerError::CategoryExists(name.to_string()));
        }
        self.categories.push(name.to_string());
        Ok(name.to_string())
    }

    pub fn set_budget(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(TrackerError::NegativeBudget(amount.to_string()));
        }
        self.monthly_budget = amount;
        Ok(())
    }

    /// Copy with every category trimmed and blank entries dropped.
    pub fn cleaned(&self) -> Settings {
        Settings {
            monthly_budget: self.monthly_budget,
            categories: self
                .categories
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A calendar month, rendered and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        Ok(Self::of(d))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_trims_and_rejects_duplicates() {
        let mut s = Settings::default();
        assert_eq!(s.add_category("  Travel ").unwrap(), "Travel");
        assert!(matches!(
            s.add_category("Travel  "),
            Err(TrackerError::CategoryExists(_))
        ));
        assert!(matches!(s.add_category("   "), Err(TrackerError::BlankCategory)));
        assert_eq!(s.categories.iter().filter(|c| *c == "Travel").count(), 1);
    }

    #[test]
    fn settings_fill_missing_keys_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"monthly_budget": 1500}"#).unwrap();
        assert_eq!(s.monthly_budget, Decimal::from(1500));
        assert_eq!(s.categories, default_categories());
    }

    #[test]
    fn year_month_rolls_over_december() {
        let dec: YearMonth = "2024-12".parse().unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");
        assert!("2024-13".parse::<YearMonth>().is_err());
    }
}
