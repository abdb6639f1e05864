// src/derive/mod.rs

//! Derivation stage: parses `Viewing_Month` and attaches `Year` and
//! `Popularity_Score` to every record.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{load::RawRecord, table::Record};

pub mod date_parser;

pub use date_parser::parse_viewing_month;

#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("row {row}: unparseable Viewing_Month {value:?} (film {film:?})")]
    InvalidDate {
        row: usize,
        film: String,
        value: String,
    },
}

/// What to do with rows whose `Viewing_Month` does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDatePolicy {
    /// Abort derivation at the first bad row.
    #[default]
    Fail,
    /// Drop the row and keep going.
    Skip,
}

#[derive(Debug)]
pub struct Derived {
    pub records: Vec<Record>,
    /// Rows dropped under `InvalidDatePolicy::Skip`.
    pub skipped: usize,
}

#[tracing::instrument(level = "info", skip(raw), fields(rows = raw.len()))]
pub fn derive_records(
    raw: Vec<RawRecord>,
    policy: InvalidDatePolicy,
) -> Result<Derived, DerivationError> {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (idx, raw) in raw.into_iter().enumerate() {
        let row = idx + 1;
        match parse_viewing_month(&raw.viewing_month) {
            Some(date) => records.push(Record::derive(raw, date)),
            None => match policy {
                InvalidDatePolicy::Fail => {
                    return Err(DerivationError::InvalidDate {
                        row,
                        film: raw.film_name,
                        value: raw.viewing_month,
                    })
                }
                InvalidDatePolicy::Skip => {
                    warn!(
                        row,
                        value = %raw.viewing_month,
                        "skipping row with unparseable Viewing_Month"
                    );
                    skipped += 1;
                }
            },
        }
    }

    info!(derived = records.len(), skipped, "derivation complete");
    Ok(Derived { records, skipped })
}
