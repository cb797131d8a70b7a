//! Daily metrics builder: the compounding fold over the day sequence.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Cashflow, DayEntry, DayMetrics, DayStatus, JournalSettings};

use super::cashflow::net_cashflow_on;

/// Builder producing one [`DayMetrics`] record per day entry.
pub struct MetricsBuilder;

impl MetricsBuilder {
    /// Walk the day entries in list order, carrying the compounding base
    /// forward, and emit one metrics record per entry.
    ///
    /// The base only rolls forward from settled days: a reported close
    /// replaces it, a no-trade day shifts it by that day's net cashflow, and
    /// a pending day leaves it untouched so every later day is measured
    /// against the same unresolved target.
    ///
    /// Returns an empty sequence when settings are absent.
    pub fn build(
        settings: Option<&JournalSettings>,
        days: &[DayEntry],
        cashflows: &[Cashflow],
    ) -> Vec<DayMetrics> {
        let Some(settings) = settings else {
            return Vec::new();
        };

        let mut running_start = settings.starting_capital;
        let mut out = Vec::with_capacity(days.len());

        for (index, entry) in days.iter().enumerate() {
            let target_start = running_start;
            let target_end = settings.target_end_from(target_start);
            let target_gain = target_end - target_start;
            let net_cashflow = net_cashflow_on(cashflows, entry.date);

            // A no-trade flag overrides a stored close for every derivation
            // step, including the classification below and the rollover.
            let (trading_change, trading_pct, status) = if entry.no_trade {
                (
                    Some(Decimal::ZERO),
                    Some(Decimal::ZERO),
                    DayStatus::Neutral,
                )
            } else if let Some(close) = entry.actual_close {
                // External capital movements are not performance: measure the
                // close against the start shifted by the day's net cashflow.
                let change = close - target_start - net_cashflow;
                let pct = if target_start > Decimal::ZERO {
                    change / target_start * dec!(100)
                } else {
                    Decimal::ZERO
                };
                (Some(change), Some(pct), Self::classify(change, target_gain))
            } else {
                (None, None, DayStatus::Pending)
            };

            let (next_start, equity_value) = if entry.no_trade {
                let settled = target_start + net_cashflow;
                (settled, settled)
            } else if let Some(close) = entry.actual_close {
                (close, close)
            } else {
                (running_start, target_start)
            };
            running_start = next_start;

            out.push(DayMetrics {
                entry: entry.clone(),
                day_index: (index + 1) as u32,
                target_start,
                target_end,
                target_gain,
                net_cashflow,
                trading_change,
                trading_pct,
                status,
                equity_value,
            });
        }

        out
    }

    /// Classify a settled day's trading change against its required gain.
    fn classify(change: Decimal, target_gain: Decimal) -> DayStatus {
        if change >= target_gain {
            DayStatus::Goal
        } else if change > Decimal::ZERO {
            DayStatus::Green
        } else if change == Decimal::ZERO {
            DayStatus::Neutral
        } else {
            DayStatus::Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CashflowKind;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn settings() -> JournalSettings {
        JournalSettings {
            starting_capital: dec!(10000),
            daily_target_pct: dec!(1),
            start_date: date(1),
            target_goal: dec!(20000),
        }
    }

    fn day(d: u32, close: Option<Decimal>, no_trade: bool) -> DayEntry {
        DayEntry::new(date(d), close, no_trade)
    }

    #[test]
    fn test_no_settings_yields_empty_sequence() {
        let days = vec![day(1, Some(dec!(10200)), false)];
        assert!(MetricsBuilder::build(None, &days, &[]).is_empty());
    }

    #[test]
    fn test_goal_day_metrics() {
        let days = vec![day(1, Some(dec!(10200)), false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        assert_eq!(metrics.len(), 1);
        let m = &metrics[0];
        assert_eq!(m.day_index, 1);
        assert_eq!(m.target_start, dec!(10000));
        assert_eq!(m.target_end, dec!(10100));
        assert_eq!(m.target_gain, dec!(100));
        assert_eq!(m.trading_change, Some(dec!(200)));
        assert_eq!(m.trading_pct, Some(dec!(2)));
        assert_eq!(m.status, DayStatus::Goal);
        assert_eq!(m.equity_value, dec!(10200));
    }

    #[test]
    fn test_base_rolls_from_actual_close() {
        let days = vec![
            day(1, Some(dec!(10050)), false),
            day(2, Some(dec!(10100)), false),
        ];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        assert_eq!(metrics[0].trading_change, Some(dec!(50)));
        assert_eq!(metrics[0].status, DayStatus::Green);
        // Day 2 compounds from day 1's close, not from the original capital.
        assert_eq!(metrics[1].target_start, dec!(10050));
        assert_eq!(metrics[1].target_end, dec!(10150.50));
    }

    #[test]
    fn test_pending_day_freezes_the_base() {
        let days = vec![
            day(1, None, false),
            day(2, None, false),
            day(3, Some(dec!(10100)), false),
        ];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        assert_eq!(metrics[0].status, DayStatus::Pending);
        assert_eq!(metrics[0].trading_change, None);
        assert_eq!(metrics[0].trading_pct, None);
        assert_eq!(metrics[0].equity_value, dec!(10000));
        // Both later days are measured against the same unresolved base.
        assert_eq!(metrics[1].target_start, dec!(10000));
        assert_eq!(metrics[2].target_start, dec!(10000));
        assert_eq!(metrics[2].status, DayStatus::Goal);
    }

    #[test]
    fn test_no_trade_day_advances_by_net_cashflow() {
        let flows = vec![Cashflow::new(date(1), dec!(500), CashflowKind::Deposit, None)];
        let days = vec![day(1, None, true), day(2, None, false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &flows);

        let m = &metrics[0];
        assert_eq!(m.status, DayStatus::Neutral);
        assert_eq!(m.trading_change, Some(Decimal::ZERO));
        assert_eq!(m.trading_pct, Some(Decimal::ZERO));
        assert_eq!(m.net_cashflow, dec!(500));
        assert_eq!(m.equity_value, dec!(10500));
        assert_eq!(metrics[1].target_start, dec!(10500));
    }

    #[test]
    fn test_no_trade_overrides_a_stored_close() {
        let days = vec![day(1, Some(dec!(12345)), true), day(2, None, false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        // The stored close is ignored by the fold: neutral status, zero
        // change, and the base rolls by cashflow (none here), not the close.
        assert_eq!(metrics[0].status, DayStatus::Neutral);
        assert_eq!(metrics[0].equity_value, dec!(10000));
        assert_eq!(metrics[1].target_start, dec!(10000));
    }

    #[test]
    fn test_cashflow_excluded_from_performance() {
        // A 1000 deposit lands the same day; closing at 10950 means the
        // account lost 50 by trading.
        let flows = vec![Cashflow::new(date(1), dec!(1000), CashflowKind::Deposit, None)];
        let days = vec![day(1, Some(dec!(10950)), false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &flows);

        assert_eq!(metrics[0].trading_change, Some(dec!(-50)));
        assert_eq!(metrics[0].status, DayStatus::Red);
    }

    #[test]
    fn test_change_equal_to_gain_is_goal() {
        let days = vec![day(1, Some(dec!(10100)), false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);
        assert_eq!(metrics[0].status, DayStatus::Goal);

        let days = vec![day(1, Some(dec!(10099.99)), false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);
        assert_eq!(metrics[0].status, DayStatus::Green);
    }

    #[test]
    fn test_exact_zero_change_is_neutral() {
        let days = vec![day(1, Some(dec!(10000)), false)];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        assert_eq!(metrics[0].trading_change, Some(Decimal::ZERO));
        assert_eq!(metrics[0].status, DayStatus::Neutral);
    }

    #[test]
    fn test_day_index_follows_insertion_order_not_dates() {
        // Dates deliberately out of order; the sequence is insertion order.
        let days = vec![
            day(9, Some(dec!(10100)), false),
            day(2, Some(dec!(10200)), false),
            day(5, None, false),
        ];
        let metrics = MetricsBuilder::build(Some(&settings()), &days, &[]);

        let indexes: Vec<u32> = metrics.iter().map(|m| m.day_index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(metrics[1].target_start, dec!(10100));
    }

    #[test]
    fn test_zero_base_never_divides() {
        let zero = JournalSettings {
            starting_capital: Decimal::ZERO,
            ..settings()
        };
        let days = vec![day(1, Some(dec!(100)), false)];
        let metrics = MetricsBuilder::build(Some(&zero), &days, &[]);

        assert_eq!(metrics[0].trading_change, Some(dec!(100)));
        assert_eq!(metrics[0].trading_pct, Some(Decimal::ZERO));
    }
}
