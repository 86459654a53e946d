use super::ledger::{LedgerStage, LedgerState};
use super::money::Fcfa;
use super::offer::PackageOffer;
use super::payment::{PaymentMethod, PaymentRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the balance overview shown for each pilgrim.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct LedgerSummary {
    pub passport: String,
    pub package_price: Fcfa,
    pub discount: Fcfa,
    pub total_due: Fcfa,
    pub paid: Fcfa,
    pub remaining: Fcfa,
    pub status: LedgerStage,
}

impl LedgerSummary {
    pub fn new(offer: &PackageOffer, state: &LedgerState) -> Self {
        Self {
            passport: offer.passport.to_string(),
            package_price: offer.package_price,
            discount: state.effective_discount,
            total_due: state.total_due,
            paid: state.amount_paid_so_far,
            remaining: state.remaining_before,
            status: state.stage(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct MethodTotal {
    pub count: usize,
    pub total: Fcfa,
}

/// Collected amounts grouped by payment method.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct MethodBreakdown {
    pub by_method: BTreeMap<PaymentMethod, MethodTotal>,
}

impl MethodBreakdown {
    pub fn from_payments<'a, I>(payments: I) -> Self
    where
        I: IntoIterator<Item = &'a PaymentRecord>,
    {
        let mut by_method: BTreeMap<PaymentMethod, MethodTotal> = BTreeMap::new();
        for payment in payments {
            let entry = by_method.entry(payment.method).or_default();
            entry.count += 1;
            entry.total += payment.amount_paid;
        }
        Self { by_method }
    }

    pub fn get(&self, method: PaymentMethod) -> MethodTotal {
        self.by_method.get(&method).copied().unwrap_or_default()
    }

    pub fn grand_total(&self) -> Fcfa {
        self.by_method.values().map(|t| t.total).sum()
    }
}
