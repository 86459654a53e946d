use super::money::Fcfa;
use super::offer::PassportNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    InProgress,
    Settled,
}

impl InstallmentStatus {
    pub fn from_remaining(remaining_after: Fcfa) -> Self {
        if remaining_after.is_positive() {
            InstallmentStatus::InProgress
        } else {
            InstallmentStatus::Settled
        }
    }
}

/// Versement: companion entry tracking the running remainder after a payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct InstallmentRecord {
    pub passport: PassportNumber,
    pub due_date: NaiveDate,
    pub amount_paid: Fcfa,
    pub remaining_after: Fcfa,
    pub status: InstallmentStatus,
}
