//! Withdrawal recommender: advisory payout amounts under the configured rule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    DayMetrics, JournalSettings, WithdrawalAdvice, WithdrawalPolicy, WithdrawalRule,
};

/// Calculator for the suggested withdrawal amount.
pub struct WithdrawalRecommender;

impl WithdrawalRecommender {
    /// Resolve current equity and the high-water mark from reported closes,
    /// then size a payout from the rule's base amount. Advisory only.
    pub fn recommend(
        settings: Option<&JournalSettings>,
        metrics: &[DayMetrics],
        policy: &WithdrawalPolicy,
    ) -> WithdrawalAdvice {
        let Some(settings) = settings else {
            return WithdrawalAdvice::empty(policy.rule);
        };

        // Latest reported close wins; an unreported journal sits at its
        // starting capital.
        let equity = metrics
            .iter()
            .rev()
            .find_map(|m| m.entry.actual_close)
            .unwrap_or(settings.starting_capital);

        let high_water_mark = metrics
            .iter()
            .filter_map(|m| m.entry.actual_close)
            .fold(settings.starting_capital, |peak, close| peak.max(close));

        let base = match policy.rule {
            WithdrawalRule::ProfitStart => (equity - settings.starting_capital).max(Decimal::ZERO),
            WithdrawalRule::ProfitHwm => {
                let threshold = (high_water_mark - policy.buffer).max(settings.starting_capital);
                (equity - threshold).max(Decimal::ZERO)
            }
            WithdrawalRule::GoalOnly => (equity - settings.target_goal).max(Decimal::ZERO),
        };

        WithdrawalAdvice {
            rule: policy.rule,
            equity,
            high_water_mark,
            base,
            suggested: base * policy.rate / dec!(100),
        }
    }
}
