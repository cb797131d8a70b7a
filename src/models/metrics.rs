//! Derived per-day metrics and aggregate statistics. Never persisted;
//! recomputed from the snapshot on every read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day::DayEntry;
use super::settings::WithdrawalRule;

/// Classification of a day relative to its compounding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// No close reported yet and not marked no-trade
    Pending,
    /// No-trade day, or a settled day that exactly broke even
    Neutral,
    /// Positive trading change short of the target gain
    Green,
    /// Trading change met or beat the target gain
    Goal,
    /// Negative trading change
    Red,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Pending => "pending",
            DayStatus::Neutral => "neutral",
            DayStatus::Green => "green",
            DayStatus::Goal => "goal",
            DayStatus::Red => "red",
        }
    }
}

/// One derived record per day entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMetrics {
    /// The source entry this record was derived from
    pub entry: DayEntry,

    /// 1-based position in the trading-day sequence
    pub day_index: u32,

    /// Compounding base at the start of the day
    pub target_start: Decimal,

    /// Equity the day should reach under the daily target
    pub target_end: Decimal,

    /// Gain required to hit the target
    pub target_gain: Decimal,

    /// Net same-date deposits minus withdrawals
    pub net_cashflow: Decimal,

    /// Cashflow-adjusted trading P&L; `None` while the day is pending
    pub trading_change: Option<Decimal>,

    /// Trading change as a percentage of the day's start
    pub trading_pct: Option<Decimal>,

    /// Performance classification
    pub status: DayStatus,

    /// Value this day contributes to the equity curve
    pub equity_value: Decimal,
}

/// Aggregate statistics over the metrics sequence and its equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveStats {
    /// Days with a settled trading change (not pending)
    pub completed_days: u32,

    /// Days with a positive trading change (includes goal days)
    pub green_days: u32,

    /// Days with a negative trading change
    pub red_days: u32,

    /// Percentage of completed days that were green
    pub win_rate: f64,

    /// Mean trading percentage over green-or-goal days
    pub avg_green: Decimal,

    /// Mean trading percentage over red days
    pub avg_red: Decimal,

    /// Gross gains over gross losses; infinite with gains and no losses
    pub profit_factor: f64,

    /// Mean trading change per completed day
    pub expectancy: Decimal,

    /// Standard deviation of the daily trading percentage
    pub volatility: f64,

    /// Maximum peak-to-trough drawdown of the equity curve, in percent
    pub max_drawdown_pct: f64,

    /// Maximum drawdown in currency terms
    pub max_drawdown_amount: Decimal,

    /// Highest point of the equity curve
    pub peak_equity: Decimal,

    /// Consecutive trailing goal days
    pub goal_streak: u32,

    /// Consecutive trailing goal-or-green days
    pub green_streak: u32,
}

impl CurveStats {
    /// Zeroed statistics for an empty journal.
    pub fn empty() -> Self {
        Self {
            completed_days: 0,
            green_days: 0,
            red_days: 0,
            win_rate: 0.0,
            avg_green: Decimal::ZERO,
            avg_red: Decimal::ZERO,
            profit_factor: 0.0,
            expectancy: Decimal::ZERO,
            volatility: 0.0,
            max_drawdown_pct: 0.0,
            max_drawdown_amount: Decimal::ZERO,
            peak_equity: Decimal::ZERO,
            goal_streak: 0,
            green_streak: 0,
        }
    }
}

impl Default for CurveStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Display-ready aggregate figures for the journal header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSummary {
    /// Latest reported close, falling back to starting capital
    pub current_equity: Decimal,

    /// Target end of the most recently evaluated day, or the first day's
    /// projection when no days exist yet
    pub projected_target_end: Decimal,

    /// Configured daily growth target percentage
    pub daily_target_pct: Decimal,

    /// Maximum drawdown over the anchored equity curve, in percent
    pub max_drawdown_pct: f64,
}

impl JournalSummary {
    /// Zeroed summary for the not-yet-configured state.
    pub fn empty() -> Self {
        Self {
            current_equity: Decimal::ZERO,
            projected_target_end: Decimal::ZERO,
            daily_target_pct: Decimal::ZERO,
            max_drawdown_pct: 0.0,
        }
    }
}

/// Advisory withdrawal recommendation. Never mutates state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalAdvice {
    /// Rule the recommendation was computed under
    pub rule: WithdrawalRule,

    /// Equity the recommendation is measured against
    pub equity: Decimal,

    /// Highest reported close, floored at starting capital
    pub high_water_mark: Decimal,

    /// Withdrawable amount the rule resolved
    pub base: Decimal,

    /// Suggested payout: base scaled by the policy rate
    pub suggested: Decimal,
}

impl WithdrawalAdvice {
    /// Zeroed advice for the not-yet-configured state.
    pub fn empty(rule: WithdrawalRule) -> Self {
        Self {
            rule,
            equity: Decimal::ZERO,
            high_water_mark: Decimal::ZERO,
            base: Decimal::ZERO,
            suggested: Decimal::ZERO,
        }
    }
}
