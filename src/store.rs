// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user flat-file persistence.
//!
//! Each user owns `{user}_data.csv` (the ledger) and `{user}_settings.json`
//! inside the data directory. Files are always rewritten whole, through a
//! temporary file renamed over the target.

use crate::errors::{Result, TrackerError};
use crate::ledger::{self, Merged, SkippedRow};
use crate::models::{Settings, Transaction};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

static USER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("user id pattern is valid"));

/// A user name that is safe to embed in a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if USER_RE.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(TrackerError::InvalidUser(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        TrackerError::DataDir("no home directory for the current user".to_string())
    })?;
    Ok(proj.data_dir().to_path_buf())
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Store rooted at `root`, or at the platform data directory when `None`.
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(r) => r,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ledger_path(&self, user: &UserId) -> PathBuf {
        self.root.join(format!("{}_data.csv", user))
    }

    pub fn settings_path(&self, user: &UserId) -> PathBuf {
        self.root.join(format!("{}_settings.json", user))
    }

    /// Missing or empty ledger files both read as an empty ledger. Rows that
    /// do not parse are skipped with a warning.
    pub fn load_ledger(&self, user: &UserId) -> Result<Vec<Transaction>> {
        Ok(self.load_ledger_checked(user)?.0)
    }

    /// Loads the ledger and also returns the rows that had to be skipped.
    pub fn load_ledger_checked(&self, user: &UserId) -> Result<(Vec<Transaction>, Vec<SkippedRow>)> {
        let path = self.ledger_path(user);
        let Some(content) = read_optional(&path)? else {
            debug!(user = %user, "no ledger file, starting empty");
            return Ok((Vec::new(), Vec::new()));
        };
        if content.trim().is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let (rows, skipped) = ledger::read_transactions_lenient(content.as_bytes())?;
        for row in &skipped {
            warn!(user = %user, line = row.line, reason = %row.reason, "skipping unreadable ledger row");
        }
        debug!(user = %user, rows = rows.len(), skipped = skipped.len(), "ledger loaded");
        Ok((rows, skipped))
    }

    /// Loads the ledger for a rewrite; skipped rows will not survive it.
    fn load_for_rewrite(&self, user: &UserId) -> Result<Vec<Transaction>> {
        let (rows, skipped) = self.load_ledger_checked(user)?;
        if !skipped.is_empty() {
            warn!(user = %user, dropped = skipped.len(), "unreadable ledger rows dropped on rewrite");
        }
        Ok(rows)
    }

    pub fn save_ledger(&self, user: &UserId, rows: &[Transaction]) -> Result<()> {
        let bytes = ledger::to_csv_bytes(rows)?;
        write_atomic(&self.ledger_path(user), &bytes)?;
        debug!(user = %user, rows = rows.len(), "ledger written");
        Ok(())
    }

    /// Loads the full ledger, appends `tx` and rewrites the file.
    pub fn append(&self, user: &UserId, tx: Transaction) -> Result<Vec<Transaction>> {
        if tx.description.trim().is_empty() {
            return Err(TrackerError::BlankDescription);
        }
        if tx.amount < Decimal::ZERO {
            return Err(TrackerError::NegativeAmount(tx.amount.to_string()));
        }
        let mut rows = self.load_for_rewrite(user)?;
        rows.push(tx);
        self.save_ledger(user, &rows)?;
        info!(user = %user, rows = rows.len(), "transaction appended");
        Ok(rows)
    }

    /// Validates `input` as a ledger CSV and merges it into the stored ledger.
    /// Nothing is written unless every row parses.
    pub fn import_merge<R: Read>(&self, user: &UserId, mut input: R) -> Result<ImportOutcome> {
        let mut content = String::new();
        input.read_to_string(&mut content)?;
        let incoming = match ledger::read_transactions(content.as_bytes()) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(user = %user, error = %e, "import rejected");
                return Err(e);
            }
        };
        let read = incoming.len();
        let existing = self.load_for_rewrite(user)?;
        let Merged {
            ledger,
            added,
            duplicates,
        } = ledger::merge(existing, incoming);
        self.save_ledger(user, &ledger)?;
        info!(user = %user, read, added, duplicates, "import merged");
        Ok(ImportOutcome {
            ledger,
            read,
            added,
            duplicates,
        })
    }

    pub fn clear(&self, user: &UserId) -> Result<()> {
        self.save_ledger(user, &[])?;
        info!(user = %user, "ledger cleared");
        Ok(())
    }

    /// Persisted settings, or the defaults on first run.
    pub fn load_settings(&self, user: &UserId) -> Result<Settings> {
        match read_optional(&self.settings_path(user))? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => {
                debug!(user = %user, "no settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Writes the cleaned settings and returns what was written.
    pub fn save_settings(&self, user: &UserId, settings: &Settings) -> Result<Settings> {
        let cleaned = settings.cleaned();
        let json = serde_json::to_string_pretty(&cleaned)?;
        write_atomic(&self.settings_path(user), json.as_bytes())?;
        debug!(user = %user, categories = cleaned.categories.len(), "settings written");
        Ok(cleaned)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub ledger: Vec<Transaction>,
    pub read: usize,
    pub added: usize,
    pub duplicates: usize,
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
