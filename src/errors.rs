// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Failures raised by the stores, the session and the settings rules.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine a data directory: {0}")]
    DataDir(String),
    #[error("Invalid user '{0}': use 1-64 characters from A-Z, a-z, 0-9, '_' and '-'")]
    InvalidUser(String),
    #[error("Type a valid category")]
    BlankCategory,
    #[error("Category '{0}' already exists")]
    CategoryExists(String),
    #[error("Unknown category '{0}'; add it with `category add` first")]
    UnknownCategory(String),
    #[error("Description must not be blank")]
    BlankDescription,
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(String),
    #[error("Budget must not be negative (got {0})")]
    NegativeBudget(String),
    #[error("File must contain: Date, Description, Amount, Category (missing: {})", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}
