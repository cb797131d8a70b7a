//! The persisted journal document.

use serde::{Deserialize, Serialize};

use super::cashflow::Cashflow;
use super::day::DayEntry;
use super::settings::{JournalSettings, WithdrawalPolicy};

/// The whole journal state. This is the unit of persistence: it is loaded,
/// mutated, and written back as one document, and it is the exact shape the
/// export/import interchange uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSnapshot {
    /// Journal configuration; `None` until the user runs `init`
    #[serde(default)]
    pub settings: Option<JournalSettings>,

    /// Day entries in insertion order (the trading-day sequence)
    #[serde(default)]
    pub days: Vec<DayEntry>,

    /// Deposit/withdrawal events
    #[serde(default)]
    pub cashflows: Vec<Cashflow>,

    /// Withdrawal recommendation policy
    #[serde(default)]
    pub withdrawal: WithdrawalPolicy,
}

impl Default for JournalSnapshot {
    fn default() -> Self {
        Self {
            settings: None,
            days: Vec::new(),
            cashflows: Vec::new(),
            withdrawal: WithdrawalPolicy::default(),
        }
    }
}
