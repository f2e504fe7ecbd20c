// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV encoding of the ledger file and the merge rule used by imports.
//!
//! The same reader serves the per-user ledger file and user-supplied import
//! files: columns are located by header name, so extra columns and any column
//! order are accepted.

use crate::errors::{Result, TrackerError};
use crate::models::Transaction;
use crate::utils::{parse_decimal, parse_ledger_date};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::{Read, Write};

pub const COLUMNS: [&str; 4] = ["Date", "Description", "Amount", "Category"];

struct ColumnIndex {
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
}

fn column_index(headers: &StringRecord) -> Result<ColumnIndex> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let found: Vec<Option<usize>> = COLUMNS.iter().map(|c| find(*c)).collect();
    let missing: Vec<String> = COLUMNS
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    match found.as_slice() {
        [Some(date), Some(description), Some(amount), Some(category)] => Ok(ColumnIndex {
            date: *date,
            description: *description,
            amount: *amount,
            category: *category,
        }),
        _ => Err(TrackerError::MissingColumns(missing)),
    }
}

fn parse_row(rec: &StringRecord, idx: &ColumnIndex) -> std::result::Result<Transaction, String> {
    let field = |i: usize, name: &str| {
        rec.get(i)
            .map(str::trim)
            .ok_or_else(|| format!("{} value missing", name))
    };
    let date_raw = field(idx.date, "Date")?;
    let description = field(idx.description, "Description")?;
    let amount_raw = field(idx.amount, "Amount")?;
    let category = field(idx.category, "Category")?;

    let date = parse_ledger_date(date_raw).map_err(|e| e.to_string())?;
    let amount = parse_decimal(amount_raw).map_err(|e| e.to_string())?;
    if amount < Decimal::ZERO {
        return Err(format!("Amount must not be negative (got {})", amount));
    }
    Ok(Transaction::new(date, description, amount, category))
}

/// A data row that could not be turned into a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

type ParsedRow = (u64, std::result::Result<Transaction, String>);

fn parse_rows<R: Read>(input: R) -> Result<Vec<ParsedRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let idx = column_index(rdr.headers()?)?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        if rec.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        out.push((line, parse_row(&rec, &idx)));
    }
    Ok(out)
}

/// Reads every row of a ledger-shaped CSV. The first bad row aborts the read.
pub fn read_transactions<R: Read>(input: R) -> Result<Vec<Transaction>> {
    parse_rows(input)?
        .into_iter()
        .map(|(line, row)| row.map_err(|reason| TrackerError::InvalidRow { line, reason }))
        .collect()
}

/// Like [`read_transactions`], but bad rows are set aside instead of failing
/// the read. A missing column or a malformed CSV file is still an error.
pub fn read_transactions_lenient<R: Read>(input: R) -> Result<(Vec<Transaction>, Vec<SkippedRow>)> {
    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (line, row) in parse_rows(input)? {
        match row {
            Ok(tx) => rows.push(tx),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }
    Ok((rows, skipped))
}

pub fn write_transactions<W: Write>(output: W, ledger: &[Transaction]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(output);
    wtr.write_record(COLUMNS)?;
    for tx in ledger {
        wtr.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.description.clone(),
            tx.amount.to_string(),
            tx.category.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes(ledger: &[Transaction]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_transactions(&mut buf, ledger)?;
    Ok(buf)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub ledger: Vec<Transaction>,
    pub added: usize,
    pub duplicates: usize,
}

/// Concatenates `incoming` onto `existing` and drops exact duplicates,
/// keeping the first occurrence of each row in its original position.
pub fn merge(existing: Vec<Transaction>, incoming: Vec<Transaction>) -> Merged {
    let mut seen: HashSet<Transaction> = HashSet::new();
    let mut ledger = Vec::with_capacity(existing.len() + incoming.len());
    let mut added = 0;
    let mut duplicates = 0;

    let tagged = existing
        .into_iter()
        .map(|tx| (tx, false))
        .chain(incoming.into_iter().map(|tx| (tx, true)));
    for (tx, is_new) in tagged {
        if seen.contains(&tx) {
            duplicates += 1;
            continue;
        }
        seen.insert(tx.clone());
        if is_new {
            added += 1;
        }
        ledger.push(tx);
    }
    Merged {
        ledger,
        added,
        duplicates,
    }
}
