//! Summary projector: the handful of aggregate figures the journal header shows.

use crate::models::{DayMetrics, JournalSettings, JournalSummary};

use super::analytics::CurveAnalytics;

/// Reducer from the metrics sequence to display-ready summary figures.
pub struct SummaryProjector;

impl SummaryProjector {
    /// Project the journal header figures from the metrics sequence.
    pub fn project(settings: Option<&JournalSettings>, metrics: &[DayMetrics]) -> JournalSummary {
        let Some(settings) = settings else {
            return JournalSummary::empty();
        };

        let current_equity = metrics
            .iter()
            .rev()
            .find_map(|m| m.entry.actual_close)
            .unwrap_or(settings.starting_capital);

        // The last evaluated day's target; before any day exists, project the
        // first day straight from the settings.
        let projected_target_end = metrics
            .last()
            .map(|m| m.target_end)
            .unwrap_or_else(|| settings.target_end_from(settings.starting_capital));

        let (max_drawdown_pct, _, _) =
            CurveAnalytics::max_drawdown(settings.starting_capital, metrics);

        JournalSummary {
            current_equity,
            projected_target_end,
            daily_target_pct: settings.daily_target_pct,
            max_drawdown_pct,
        }
    }
}
