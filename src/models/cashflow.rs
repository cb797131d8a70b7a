//! Cashflow model for deposits and withdrawals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a cashflow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashflowKind {
    Deposit,
    Withdrawal,
}

impl CashflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashflowKind::Deposit => "deposit",
            CashflowKind::Withdrawal => "withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" | "in" => Some(Self::Deposit),
            "withdrawal" | "withdraw" | "out" => Some(Self::Withdrawal),
            _ => None,
        }
    }
}

/// External capital movement on a calendar day.
///
/// Cashflows are independent of day entries; they attach to a day only by
/// matching `date`, never by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cashflow {
    /// Unique cashflow identifier
    pub id: String,

    /// Calendar day the movement settled
    pub date: NaiveDate,

    /// Non-negative magnitude of the movement
    pub amount: Decimal,

    /// Deposit or withdrawal
    pub kind: CashflowKind,

    /// Optional free-form note
    #[serde(default)]
    pub note: Option<String>,
}

impl Cashflow {
    /// Create a new cashflow with a fresh id.
    pub fn new(date: NaiveDate, amount: Decimal, kind: CashflowKind, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            amount,
            kind,
            note,
        }
    }

    /// Magnitude with the sign of its direction: deposits positive,
    /// withdrawals negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            CashflowKind::Deposit => self.amount,
            CashflowKind::Withdrawal => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let deposit = Cashflow::new(date, dec!(500), CashflowKind::Deposit, None);
        let withdrawal = Cashflow::new(date, dec!(200), CashflowKind::Withdrawal, None);

        assert_eq!(deposit.signed_amount(), dec!(500));
        assert_eq!(withdrawal.signed_amount(), dec!(-200));
    }
}
