use super::money::Fcfa;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Passport number of a pilgrim, the natural key of a ledger.
///
/// Normalized to trimmed upper-case ASCII alphanumerics so that `ab123` and
/// ` AB123 ` address the same ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PassportNumber(String);

impl PassportNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(LedgerError::Validation(
                "Passport number is required".to_string(),
            ));
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LedgerError::Validation(format!(
                "Passport number '{}' must be alphanumeric",
                raw.trim()
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PassportNumber {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PassportNumber> for String {
    fn from(passport: PassportNumber) -> Self {
        passport.0
    }
}

impl fmt::Display for PassportNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The travel package quoted to one pilgrim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOffer {
    pub passport: PassportNumber,
    pub package_price: Fcfa,
}

impl PackageOffer {
    pub fn new(passport: PassportNumber, package_price: Fcfa) -> Result<Self> {
        if package_price < Fcfa::ZERO {
            return Err(LedgerError::Validation(format!(
                "Package price for {} cannot be negative",
                passport
            )));
        }
        Ok(Self {
            passport,
            package_price,
        })
    }
}
