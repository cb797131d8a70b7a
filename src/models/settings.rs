//! Journal settings and the withdrawal payout policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Core journal configuration: the capital base and the compounding target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Capital the journal starts from; the day-1 compounding base
    pub starting_capital: Decimal,

    /// Daily growth target as a percentage (1 = 1% per trading day)
    pub daily_target_pct: Decimal,

    /// First calendar day of the journal
    pub start_date: NaiveDate,

    /// Absolute equity goal the plan compounds toward
    pub target_goal: Decimal,
}

impl JournalSettings {
    /// Projected end-of-day equity for a day starting at `base`.
    pub fn target_end_from(&self, base: Decimal) -> Decimal {
        base * (Decimal::ONE + self.daily_target_pct / dec!(100))
    }
}

/// Which profits a suggested withdrawal is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalRule {
    /// Anything above starting capital
    ProfitStart,
    /// Anything above the high-water mark minus a buffer
    ProfitHwm,
    /// Anything above the configured equity goal
    GoalOnly,
}

impl WithdrawalRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalRule::ProfitStart => "profit_start",
            WithdrawalRule::ProfitHwm => "profit_hwm",
            WithdrawalRule::GoalOnly => "goal_only",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profit_start" | "start" => Some(Self::ProfitStart),
            "profit_hwm" | "hwm" => Some(Self::ProfitHwm),
            "goal_only" | "goal" => Some(Self::GoalOnly),
            _ => None,
        }
    }
}

/// Withdrawal recommendation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalPolicy {
    /// Rule selecting the withdrawable base amount
    pub rule: WithdrawalRule,

    /// Percentage of the base to suggest paying out
    pub rate: Decimal,

    /// Absolute amount held back from the high-water mark (profit_hwm only)
    #[serde(default)]
    pub buffer: Decimal,
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        Self {
            rule: WithdrawalRule::ProfitStart,
            rate: dec!(50),
            buffer: Decimal::ZERO,
        }
    }
}
