//! Data models for the journal: settings, day entries, cashflows, and derived metrics.

mod cashflow;
mod day;
mod metrics;
mod settings;
mod snapshot;

pub use cashflow::{Cashflow, CashflowKind};
pub use day::{DayEntry, DayUpdate};
pub use metrics::{CurveStats, DayMetrics, DayStatus, JournalSummary, WithdrawalAdvice};
pub use settings::{JournalSettings, WithdrawalPolicy, WithdrawalRule};
pub use snapshot::JournalSnapshot;
