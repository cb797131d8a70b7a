//! The metrics-derivation engine: pure, synchronous computation from a
//! journal snapshot to per-day metrics, curve statistics, summary figures,
//! and a withdrawal recommendation. No I/O happens here.

mod analytics;
mod builder;
mod cashflow;
mod summary;
mod withdrawal;

pub use analytics::CurveAnalytics;
pub use builder::MetricsBuilder;
pub use cashflow::net_cashflow_on;
pub use summary::SummaryProjector;
pub use withdrawal::WithdrawalRecommender;

use crate::models::{CurveStats, DayMetrics, JournalSnapshot, JournalSummary, WithdrawalAdvice};

/// Everything the presentation layer consumes, derived in one pass over an
/// immutable snapshot.
#[derive(Debug, Clone)]
pub struct JournalView {
    /// One derived record per day entry, in sequence order
    pub metrics: Vec<DayMetrics>,

    /// Drawdown, win/loss, and streak statistics
    pub stats: CurveStats,

    /// Display-ready aggregate figures
    pub summary: JournalSummary,

    /// Advisory withdrawal recommendation
    pub advice: WithdrawalAdvice,
}

impl JournalView {
    /// Derive the full view from the current snapshot.
    ///
    /// An unconfigured journal (no settings yet) yields empty metrics and
    /// zeroed aggregates; it is a valid state, not an error.
    pub fn derive(snapshot: &JournalSnapshot) -> Self {
        let settings = snapshot.settings.as_ref();
        let metrics = MetricsBuilder::build(settings, &snapshot.days, &snapshot.cashflows);
        let stats = CurveAnalytics::calculate(settings, &metrics);
        let summary = SummaryProjector::project(settings, &metrics);
        let advice = WithdrawalRecommender::recommend(settings, &metrics, &snapshot.withdrawal);

        Self {
            metrics,
            stats,
            summary,
            advice,
        }
    }
}
