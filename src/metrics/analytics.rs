//! Curve analytics: drawdown over the equity curve, win/loss statistics, and
//! trailing streaks over the metrics sequence.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use statrs::statistics::Statistics;

use crate::models::{CurveStats, DayMetrics, DayStatus, JournalSettings};

/// Calculator for statistics over the derived metrics sequence.
pub struct CurveAnalytics;

impl CurveAnalytics {
    /// Compute the full statistics block for the journal.
    pub fn calculate(settings: Option<&JournalSettings>, metrics: &[DayMetrics]) -> CurveStats {
        let Some(settings) = settings else {
            return CurveStats::empty();
        };

        let mut stats = CurveStats::empty();

        let (dd_pct, dd_amount, peak) = Self::max_drawdown(settings.starting_capital, metrics);
        stats.max_drawdown_pct = dd_pct;
        stats.max_drawdown_amount = dd_amount;
        stats.peak_equity = peak;

        Self::calculate_day_stats(&mut stats, metrics);
        Self::calculate_streaks(&mut stats, metrics);

        stats
    }

    /// Maximum drawdown over the equity curve, anchored at the starting
    /// capital as day 0. Returns `(percent, amount, peak equity)`.
    ///
    /// The running peak starts at the anchor; a peak of zero never divides.
    pub fn max_drawdown(anchor: Decimal, metrics: &[DayMetrics]) -> (f64, Decimal, Decimal) {
        let mut peak = anchor;
        let mut max_dd = Decimal::ZERO;
        let mut max_dd_pct = 0.0f64;

        let curve = std::iter::once(anchor).chain(metrics.iter().map(|m| m.equity_value));
        for value in curve {
            if value > peak {
                peak = value;
            }

            if peak > Decimal::ZERO {
                let dd = peak - value;
                if dd > max_dd {
                    max_dd = dd;
                }

                let dd_pct = (dd / peak).to_f64().unwrap_or(0.0);
                if dd_pct > max_dd_pct {
                    max_dd_pct = dd_pct;
                }
            }
        }

        (max_dd_pct * 100.0, max_dd, peak)
    }

    /// Win/loss statistics over completed days (days with a settled trading
    /// change; pending days are excluded, no-trade days count as completed).
    fn calculate_day_stats(stats: &mut CurveStats, metrics: &[DayMetrics]) {
        let changes: Vec<Decimal> = metrics.iter().filter_map(|m| m.trading_change).collect();
        if changes.is_empty() {
            return;
        }

        let (wins, losses): (Vec<Decimal>, Vec<Decimal>) = changes
            .iter()
            .copied()
            .filter(|c| !c.is_zero())
            .partition(|&c| c > Decimal::ZERO);

        stats.completed_days = changes.len() as u32;
        stats.green_days = wins.len() as u32;
        stats.red_days = losses.len() as u32;
        stats.win_rate = wins.len() as f64 / changes.len() as f64 * 100.0;

        let green_pcts: Vec<Decimal> = metrics
            .iter()
            .filter(|m| matches!(m.status, DayStatus::Goal | DayStatus::Green))
            .filter_map(|m| m.trading_pct)
            .collect();
        if !green_pcts.is_empty() {
            stats.avg_green =
                green_pcts.iter().sum::<Decimal>() / Decimal::from(green_pcts.len() as u32);
        }

        let red_pcts: Vec<Decimal> = metrics
            .iter()
            .filter(|m| m.status == DayStatus::Red)
            .filter_map(|m| m.trading_pct)
            .collect();
        if !red_pcts.is_empty() {
            stats.avg_red = red_pcts.iter().sum::<Decimal>() / Decimal::from(red_pcts.len() as u32);
        }

        let gross_gain: Decimal = wins.iter().sum();
        let gross_loss: Decimal = losses.iter().map(|l| l.abs()).sum();
        stats.profit_factor = if gross_loss > Decimal::ZERO {
            (gross_gain / gross_loss).to_f64().unwrap_or(0.0)
        } else if gross_gain > Decimal::ZERO {
            f64::INFINITY
        } else {
            0.0
        };

        stats.expectancy =
            changes.iter().sum::<Decimal>() / Decimal::from(changes.len() as u32);

        let pcts: Vec<f64> = metrics
            .iter()
            .filter(|m| m.trading_change.is_some())
            .filter_map(|m| m.trading_pct.and_then(|p| p.to_f64()))
            .collect();
        if pcts.len() >= 2 {
            stats.volatility = pcts.std_dev();
        }
    }

    /// Trailing streaks, scanning backward from the most recent day.
    fn calculate_streaks(stats: &mut CurveStats, metrics: &[DayMetrics]) {
        for m in metrics.iter().rev() {
            if m.status == DayStatus::Goal {
                stats.goal_streak += 1;
            } else {
                break;
            }
        }

        for m in metrics.iter().rev() {
            if matches!(m.status, DayStatus::Goal | DayStatus::Green) {
                stats.green_streak += 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsBuilder;
    use crate::models::DayEntry;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn settings(capital: Decimal) -> JournalSettings {
        JournalSettings {
            starting_capital: capital,
            daily_target_pct: dec!(1),
            start_date: date(1),
            target_goal: dec!(20000),
        }
    }

    fn metrics_for(closes: &[Option<Decimal>], capital: Decimal) -> Vec<DayMetrics> {
        let days: Vec<DayEntry> = closes
            .iter()
            .enumerate()
            .map(|(i, close)| DayEntry::new(date(i as u32 + 1), *close, false))
            .collect();
        MetricsBuilder::build(Some(&settings(capital)), &days, &[])
    }

    #[test]
    fn test_rising_curve_has_zero_drawdown() {
        let metrics = metrics_for(
            &[Some(dec!(10100)), Some(dec!(10100)), Some(dec!(10400))],
            dec!(10000),
        );
        let (pct, amount, peak) = CurveAnalytics::max_drawdown(dec!(10000), &metrics);

        assert_eq!(pct, 0.0);
        assert_eq!(amount, Decimal::ZERO);
        assert_eq!(peak, dec!(10400));
    }

    #[test]
    fn test_drawdown_from_peak() {
        // Peak 12000, trough 9000: drawdown 25%.
        let metrics = metrics_for(&[Some(dec!(12000)), Some(dec!(9000))], dec!(10000));
        let (pct, amount, peak) = CurveAnalytics::max_drawdown(dec!(10000), &metrics);

        assert!((pct - 25.0).abs() < 1e-9);
        assert_eq!(amount, dec!(3000));
        assert_eq!(peak, dec!(12000));
    }

    #[test]
    fn test_drawdown_is_scale_invariant() {
        let base = metrics_for(&[Some(dec!(12000)), Some(dec!(9000))], dec!(10000));
        let scaled = metrics_for(&[Some(dec!(36000)), Some(dec!(27000))], dec!(30000));

        let (a, _, _) = CurveAnalytics::max_drawdown(dec!(10000), &base);
        let (b, _, _) = CurveAnalytics::max_drawdown(dec!(30000), &scaled);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_zero_peak_never_divides() {
        let metrics = metrics_for(&[Some(Decimal::ZERO)], Decimal::ZERO);
        let (pct, amount, _) = CurveAnalytics::max_drawdown(Decimal::ZERO, &metrics);

        assert_eq!(pct, 0.0);
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn test_win_rate_counts_greens_over_completed() {
        // Goal, red, pending, exact-neutral: 1 green out of 3 completed.
        let metrics = metrics_for(
            &[
                Some(dec!(10200)),
                Some(dec!(10100)),
                None,
                Some(dec!(10100)),
            ],
            dec!(10000),
        );
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.completed_days, 3);
        assert_eq!(stats.green_days, 1);
        assert_eq!(stats.red_days, 1);
        assert!((stats.win_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_profit_factor_infinite_with_no_losses() {
        let metrics = metrics_for(&[Some(dec!(10200))], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert!(stats.profit_factor.is_infinite());
    }

    #[test]
    fn test_profit_factor_zero_when_flat() {
        let metrics = metrics_for(&[Some(dec!(10000)), None], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.profit_factor, 0.0);
    }

    #[test]
    fn test_profit_factor_ratio() {
        // +200 then -100 on the rolled base.
        let metrics = metrics_for(&[Some(dec!(10200)), Some(dec!(10100))], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert!((stats.profit_factor - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_averages_split_by_status() {
        // Goal +2%, then a red day.
        let metrics = metrics_for(&[Some(dec!(10200)), Some(dec!(10098))], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.avg_green, dec!(2));
        assert_eq!(stats.avg_red, dec!(-1));
    }

    #[test]
    fn test_streaks_stop_at_first_break() {
        // red, green, goal, goal: goal streak 2, green streak 3.
        let metrics = metrics_for(
            &[
                Some(dec!(9900)),
                Some(dec!(9950)),
                Some(dec!(10100)),
                Some(dec!(10300)),
            ],
            dec!(10000),
        );
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.goal_streak, 2);
        assert_eq!(stats.green_streak, 3);
    }

    #[test]
    fn test_pending_day_breaks_streaks() {
        let metrics = metrics_for(&[Some(dec!(10500)), None, Some(dec!(11000))], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.goal_streak, 1);
        assert_eq!(stats.green_streak, 1);
    }

    #[test]
    fn test_expectancy_and_volatility() {
        // Changes +200 and -100: expectancy 50.
        let metrics = metrics_for(&[Some(dec!(10200)), Some(dec!(10100))], dec!(10000));
        let stats = CurveAnalytics::calculate(Some(&settings(dec!(10000))), &metrics);

        assert_eq!(stats.expectancy, dec!(50));
        assert!(stats.volatility > 0.0);
    }

    #[test]
    fn test_no_settings_yields_empty_stats() {
        let stats = CurveAnalytics::calculate(None, &[]);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.profit_factor, 0.0);
    }
}
