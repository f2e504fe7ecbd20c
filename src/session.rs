// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{Result, TrackerError};
use crate::ledger::SkippedRow;
use crate::models::{Settings, Transaction};
use crate::store::{ImportOutcome, Store, UserId};
use rust_decimal::Decimal;
use std::io::Read;
use tracing::info;

/// One user's working state: the loaded ledger and settings plus the store
/// they came from. Opening a session is the login; dropping it is the logout
/// and leaves both files as they are.
#[derive(Debug)]
pub struct Session {
    store: Store,
    user: UserId,
    ledger: Vec<Transaction>,
    /// Rows of the ledger file that did not parse on open.
    skipped: Vec<SkippedRow>,
    settings: Settings,
}

impl Session {
    pub fn open(store: Store, user: &str) -> Result<Self> {
        let user = UserId::parse(user)?;
        let (ledger, skipped) = store.load_ledger_checked(&user)?;
        let settings = store.load_settings(&user)?;
        info!(user = %user, transactions = ledger.len(), skipped = skipped.len(), "session opened");
        Ok(Self {
            store,
            user,
            ledger,
            skipped,
            settings,
        })
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Empty once the ledger file has been rewritten.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Records a spending entered by hand. The category must be one of the
    /// user's categories.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<()> {
        if !self.settings.has_category(&tx.category) {
            return Err(TrackerError::UnknownCategory(tx.category));
        }
        let tx = Transaction {
            description: tx.description.trim().to_string(),
            ..tx
        };
        self.ledger = self.store.append(&self.user, tx)?;
        self.skipped.clear();
        Ok(())
    }

    pub fn import_csv<R: Read>(&mut self, input: R) -> Result<ImportOutcome> {
        let outcome = self.store.import_merge(&self.user, input)?;
        self.ledger = outcome.ledger.clone();
        self.skipped.clear();
        Ok(outcome)
    }

    /// Deletes the whole history; returns how many rows were dropped.
    pub fn clear_history(&mut self) -> Result<usize> {
        self.store.clear(&self.user)?;
        self.skipped.clear();
        Ok(std::mem::take(&mut self.ledger).len())
    }

    pub fn add_category(&mut self, name: &str) -> Result<String> {
        let mut next = self.settings.clone();
        let added = next.add_category(name)?;
        self.settings = self.store.save_settings(&self.user, &next)?;
        Ok(added)
    }

    pub fn set_budget(&mut self, amount: Decimal) -> Result<()> {
        let mut next = self.settings.clone();
        next.set_budget(amount)?;
        self.settings = self.store.save_settings(&self.user, &next)?;
        Ok(())
    }

    /// Writes the current settings, creating the file on first run.
    pub fn save_settings(&mut self) -> Result<()> {
        self.settings = self.store.save_settings(&self.user, &self.settings)?;
        Ok(())
    }
}
