use super::money::Fcfa;
use super::payment::PaymentRecord;
use serde::{Deserialize, Serialize};

/// Lifecycle of a passport's ledger.
///
/// Only a payment moves a ledger out of `New`, even when nothing is due.
/// `Complete` is terminal: no transition leaves it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStage {
    New,
    Partial,
    Complete,
}

/// Balance snapshot of one ledger, derived from its package price and history.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct LedgerState {
    pub package_price: Fcfa,
    /// Discount carried by the earliest prior payment with a nonzero discount.
    pub locked_discount: Option<Fcfa>,
    pub effective_discount: Fcfa,
    pub amount_paid_so_far: Fcfa,
    /// Never below `amount_paid_so_far`.
    pub total_due: Fcfa,
    pub remaining_before: Fcfa,
    pub payment_count: usize,
}

impl LedgerState {
    /// Largest amount the next payment may carry.
    pub fn montant_max(&self) -> Fcfa {
        self.total_due.min(self.remaining_before)
    }

    pub fn is_settled(&self) -> bool {
        self.montant_max() == Fcfa::ZERO
    }

    pub fn is_discount_locked(&self) -> bool {
        self.locked_discount.is_some()
    }

    /// True when the discounted price fell below what was already paid and
    /// `total_due` had to be floored at `amount_paid_so_far`.
    pub fn is_total_due_floored(&self) -> bool {
        self.discounted_price() < self.amount_paid_so_far
    }

    pub fn discounted_price(&self) -> Fcfa {
        self.package_price - self.effective_discount
    }

    pub fn stage(&self) -> LedgerStage {
        if self.payment_count == 0 {
            LedgerStage::New
        } else if !self.remaining_before.is_positive() {
            LedgerStage::Complete
        } else {
            LedgerStage::Partial
        }
    }
}

/// Derives the ledger state for `package_price` given every prior payment of
/// the passport.
///
/// Pure and total: degenerate inputs (zero or negative price, empty history)
/// still yield a well-formed snapshot. The order of `prior_payments` never
/// affects the result.
pub fn compute_state(
    package_price: Fcfa,
    prior_payments: &[PaymentRecord],
    proposed_discount: Option<Fcfa>,
) -> LedgerState {
    let package_price = package_price.max(Fcfa::ZERO);

    let locked_discount = prior_payments
        .iter()
        .filter(|payment| payment.discount.is_positive())
        .min_by(|a, b| (a.date, &a.reference).cmp(&(b.date, &b.reference)))
        .map(|payment| payment.discount);

    let effective_discount = locked_discount.unwrap_or_else(|| {
        proposed_discount
            .unwrap_or(Fcfa::ZERO)
            .clamp_to(Fcfa::ZERO, package_price)
    });

    let amount_paid_so_far: Fcfa = prior_payments.iter().map(|p| p.amount_paid).sum();
    let total_due = (package_price - effective_discount).max(amount_paid_so_far);
    let remaining_before = total_due.saturating_sub_floor(amount_paid_so_far);

    LedgerState {
        package_price,
        locked_discount,
        effective_discount,
        amount_paid_so_far,
        total_due,
        remaining_before,
        payment_count: prior_payments.len(),
    }
}
