use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// An amount of West African CFA francs.
///
/// FCFA has no minor unit, so amounts are whole integers. The value is signed
/// because raw user input (proposed amounts, proposed discounts) may be zero or
/// negative before validation; ledger records only ever hold non-negative values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fcfa(pub i64);

impl Fcfa {
    pub const ZERO: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Restricts the amount to `[min, max]`. When `max < min`, `min` wins.
    pub fn clamp_to(self, min: Self, max: Self) -> Self {
        self.min(max).max(min)
    }

    /// Subtraction floored at zero.
    pub fn saturating_sub_floor(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0).max(0))
    }
}

impl From<i64> for Fcfa {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fcfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FCFA", self.0)
    }
}

impl Add for Fcfa {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fcfa {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Fcfa {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Fcfa {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Fcfa> for Fcfa {
    fn sum<I: Iterator<Item = &'a Fcfa>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
