//! Composition titles from the 19-year Metonic cycle.
//!
//! The golden number of a calendar year is its position in the Metonic cycle,
//! `year mod 19 + 1`, always in `1..=19`. A title pairs the golden number of
//! the date a piece was begun with a one-based counter kept by a
//! [`CompositionLedger`], where every golden number counts its own pieces:
//! the third piece begun in 2022 is titled `9.3`, and the first piece begun
//! in 2021 is `8.1` no matter how many 2022 pieces precede it.
//!
//! The ledger is a plain value handed around explicitly. There is no global
//! counter; two ledgers number their pieces independently.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Position of `year` in the 19-year Metonic cycle, in `1..=19`.
pub fn golden_number(year: i32) -> u32 {
    (year.rem_euclid(19) + 1) as u32
}

/// [`golden_number`] of the year `date` falls in.
pub fn golden_number_for(date: NaiveDate) -> u32 {
    golden_number(date.year())
}

/// Per-golden-number counters of issued composition titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionLedger {
    issued: BTreeMap<u32, u32>,
}

impl CompositionLedger {
    /// A ledger that has issued no titles yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many titles this ledger has issued under `golden_number`.
    pub fn issued_for(&self, golden_number: u32) -> u32 {
        self.issued.get(&golden_number).copied().unwrap_or(0)
    }

    /// Issue the next title for a piece begun on `date`.
    pub fn issue(&mut self, date: NaiveDate) -> String {
        let golden = golden_number_for(date);
        let counter = self.issued.entry(golden).or_insert(0);
        *counter += 1;
        format!("{golden}.{counter}")
    }
}
