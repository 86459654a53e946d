use super::money::Fcfa;
use super::offer::PassportNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(alias = "especes")]
    Cash,
    #[serde(alias = "mobile-money", alias = "mobilemoney")]
    MobileMoney,
    #[serde(alias = "cheque")]
    Check,
    #[serde(alias = "virement", alias = "wire")]
    WireTransfer,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Partial,
    Complete,
}

impl PaymentStatus {
    /// A payment is complete iff it brought the remaining balance to zero.
    pub fn from_remaining(remaining_after: Fcfa) -> Self {
        if remaining_after.is_positive() {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Complete
        }
    }
}

/// Identifier of a payment, unique within its passport's ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Builds the reference of the `position`-th payment (1-based) of a ledger.
    ///
    /// Ledgers are append-only, so the position never repeats for a passport.
    pub fn for_ledger(passport: &PassportNumber, position: usize) -> Self {
        Self(format!("BMVT-{}-{:03}", passport, position))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed payment in a pilgrim's ledger.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentRecord {
    pub reference: Reference,
    pub passport: PassportNumber,
    pub method: PaymentMethod,
    pub amount_paid: Fcfa,
    /// Total due snapshot at the time the payment was made.
    pub total_due_at_time: Fcfa,
    /// Nonzero only on the payment that first introduced a discount.
    pub discount: Fcfa,
    pub date: NaiveDate,
    pub status: PaymentStatus,
}
