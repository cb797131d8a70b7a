//! Day entry model: one user-entered record per trading day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single journaled trading day.
///
/// Entries live in an append-only list; the list order is the trading-day
/// sequence. The `date` field is display metadata and is not required to be
/// unique or sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    /// Unique entry identifier
    pub id: String,

    /// Calendar day this entry refers to
    pub date: NaiveDate,

    /// Recorded closing equity; `None` until the user reports it
    #[serde(default)]
    pub actual_close: Option<Decimal>,

    /// The day intentionally had no trading activity
    #[serde(default)]
    pub no_trade: bool,
}

impl DayEntry {
    /// Create a new entry with a fresh id.
    pub fn new(date: NaiveDate, actual_close: Option<Decimal>, no_trade: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            actual_close,
            no_trade,
        }
    }
}

/// In-place edit to an existing day entry. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DayUpdate {
    /// Move the entry to a different calendar day
    pub date: Option<NaiveDate>,

    /// Record (or correct) the closing equity
    pub actual_close: Option<Decimal>,

    /// Drop the recorded close, returning the day to pending
    pub clear_close: bool,

    /// Set or clear the no-trade flag
    pub no_trade: Option<bool>,
}

impl DayUpdate {
    /// Apply the edit to an entry.
    pub fn apply(&self, entry: &mut DayEntry) {
        if let Some(date) = self.date {
            entry.date = date;
        }
        if self.clear_close {
            entry.actual_close = None;
        } else if let Some(close) = self.actual_close {
            entry.actual_close = Some(close);
        }
        if let Some(no_trade) = self.no_trade {
            entry.no_trade = no_trade;
        }
    }
}
