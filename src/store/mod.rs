//! JSON document store owning the journal snapshot.
//!
//! The whole journal persists as one document, loaded and written back in
//! full under a read-modify-write discipline. Every mutation saves the
//! document and returns the refreshed derived view, so edits to any past day
//! or cashflow ripple the compounding base through all later days.
//!
//! Single-process by design: two processes pointed at the same file can race
//! and silently overwrite each other. That is an accepted limitation of the
//! document model, not something this layer guards against.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::JournalView;
use crate::models::{
    Cashflow, CashflowKind, DayEntry, DayUpdate, JournalSettings, JournalSnapshot,
    WithdrawalPolicy,
};

/// Errors surfaced by store operations.
///
/// Load-path corruption is deliberately NOT here: a missing or unreadable
/// journal file recovers to an empty document (see [`JournalStore::open`]).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no day entry with id {0}")]
    DayNotFound(String),

    #[error("no cashflow with id {0}")]
    CashflowNotFound(String),

    #[error("document is not a valid journal: {0}")]
    Import(#[source] serde_json::Error),

    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode journal document")]
    Encode(#[source] serde_json::Error),
}

/// Owner of the journal document for the lifetime of the session.
pub struct JournalStore {
    path: PathBuf,
    data: JournalSnapshot,
}

impl JournalStore {
    /// Open the journal at `path`.
    ///
    /// A missing, unreadable, or malformed file yields a fresh empty journal
    /// with a warning; it never fails the session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "journal file is malformed, starting empty");
                    JournalSnapshot::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no journal file yet, starting empty");
                JournalSnapshot::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "journal file is unreadable, starting empty");
                JournalSnapshot::default()
            }
        };

        Self { path, data }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.data
    }

    /// Derive the full metrics view from the current snapshot.
    pub fn derive(&self) -> JournalView {
        JournalView::derive(&self.data)
    }

    /// Create or replace the journal settings.
    pub fn configure(&mut self, settings: JournalSettings) -> Result<JournalView, StoreError> {
        self.data.settings = Some(settings);
        self.commit()
    }

    /// Replace the withdrawal policy.
    pub fn set_policy(&mut self, policy: WithdrawalPolicy) -> Result<JournalView, StoreError> {
        self.data.withdrawal = policy;
        self.commit()
    }

    /// Append a day entry, returning its id and the refreshed view.
    pub fn add_day(
        &mut self,
        date: NaiveDate,
        actual_close: Option<Decimal>,
        no_trade: bool,
    ) -> Result<(String, JournalView), StoreError> {
        let entry = DayEntry::new(date, actual_close, no_trade);
        let id = entry.id.clone();
        Self::warn_on_ambiguous_entry(&entry);

        self.data.days.push(entry);
        Ok((id, self.commit()?))
    }

    /// Edit a day entry in place.
    pub fn update_day(&mut self, id: &str, update: &DayUpdate) -> Result<JournalView, StoreError> {
        let entry = self
            .data
            .days
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::DayNotFound(id.to_string()))?;

        update.apply(entry);
        Self::warn_on_ambiguous_entry(entry);
        self.commit()
    }

    /// Delete a day entry by id.
    pub fn remove_day(&mut self, id: &str) -> Result<JournalView, StoreError> {
        let before = self.data.days.len();
        self.data.days.retain(|d| d.id != id);
        if self.data.days.len() == before {
            return Err(StoreError::DayNotFound(id.to_string()));
        }
        self.commit()
    }

    /// Record a deposit or withdrawal, returning its id and the refreshed view.
    pub fn add_cashflow(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        kind: CashflowKind,
        note: Option<String>,
    ) -> Result<(String, JournalView), StoreError> {
        let flow = Cashflow::new(date, amount, kind, note);
        let id = flow.id.clone();
        self.data.cashflows.push(flow);
        Ok((id, self.commit()?))
    }

    /// Delete a cashflow by id.
    pub fn remove_cashflow(&mut self, id: &str) -> Result<JournalView, StoreError> {
        let before = self.data.cashflows.len();
        self.data.cashflows.retain(|c| c.id != id);
        if self.data.cashflows.len() == before {
            return Err(StoreError::CashflowNotFound(id.to_string()));
        }
        self.commit()
    }

    /// Write the journal document to an interchange file.
    pub fn export(&self, path: &Path) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.data).map_err(StoreError::Encode)?;
        fs::write(path, raw).map_err(|source| StoreError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the journal with a previously exported document.
    ///
    /// A document that does not decode as a journal is rejected and the
    /// existing state is left untouched. Missing collections in an otherwise
    /// valid document default to empty.
    pub fn import(&mut self, path: &Path) -> Result<JournalView, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: JournalSnapshot = serde_json::from_str(&raw).map_err(StoreError::Import)?;

        self.data = snapshot;
        self.commit()
    }

    /// Persist the document and return the refreshed derived view.
    fn commit(&mut self) -> Result<JournalView, StoreError> {
        let raw = serde_json::to_string_pretty(&self.data).map_err(StoreError::Encode)?;
        fs::write(&self.path, raw).map_err(|source| StoreError::WriteFile {
            path: self.path.clone(),
            source,
        })?;

        Ok(self.derive())
    }

    /// A day flagged no-trade with a close on record is a data-entry
    /// ambiguity: the flag wins for all derivation.
    fn warn_on_ambiguous_entry(entry: &DayEntry) {
        if entry.no_trade && entry.actual_close.is_some() {
            warn!(
                id = %entry.id,
                date = %entry.date,
                "day is marked no-trade but has a recorded close; the close is ignored for compounding"
            );
        }
    }
}
