//! Cashflow aggregation: netting deposits and withdrawals per calendar day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Cashflow;

/// Signed net amount of all cashflows settling on `date`: deposits add,
/// withdrawals subtract. Days with no cashflows net to zero.
pub fn net_cashflow_on(cashflows: &[Cashflow], date: NaiveDate) -> Decimal {
    cashflows
        .iter()
        .filter(|c| c.date == date)
        .map(|c| c.signed_amount())
        .sum()
}
