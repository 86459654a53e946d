use crate::domain::installment::{InstallmentRecord, InstallmentStatus};
use crate::domain::ledger::LedgerState;
use crate::domain::money::Fcfa;
use crate::domain::offer::PassportNumber;
use crate::domain::payment::{PaymentMethod, PaymentRecord, PaymentStatus, Reference};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// A payment as entered by an agent, before validation.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentDraft {
    pub passport: String,
    pub amount: Fcfa,
    pub method: Option<PaymentMethod>,
    pub date: Option<NaiveDate>,
    pub discount: Option<Fcfa>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Severity {
    /// Shown to the user, does not block the commit.
    Notice,
    /// Blocks the commit until the input is corrected.
    Blocking,
    /// The commit is refused whatever the input.
    Fatal,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ValidationIssue {
    #[error("amount required and must be positive")]
    AmountRequired,
    #[error("amount {proposed} is outside the valid range [0, {max}]")]
    AmountOutOfRange { proposed: Fcfa, max: Fcfa },
    #[error("ledger already settled; no further payment allowed")]
    LedgerSettled,
    #[error("payment method is required")]
    MissingMethod,
    #[error("payment date is required")]
    MissingDate,
    #[error("discount is locked at {locked} and cannot be changed to {proposed}")]
    DiscountLocked { locked: Fcfa, proposed: Fcfa },
    #[error("discount {proposed} was adjusted to {applied}")]
    DiscountAdjusted { proposed: Fcfa, applied: Fcfa },
    #[error("total due kept at {amount_paid} because the discounted price {discounted} is below what was already paid")]
    TotalDueFloored { discounted: Fcfa, amount_paid: Fcfa },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::LedgerSettled => Severity::Fatal,
            ValidationIssue::AmountRequired
            | ValidationIssue::AmountOutOfRange { .. }
            | ValidationIssue::MissingMethod
            | ValidationIssue::MissingDate
            | ValidationIssue::DiscountLocked { .. } => Severity::Blocking,
            ValidationIssue::DiscountAdjusted { .. } | ValidationIssue::TotalDueFloored { .. } => {
                Severity::Notice
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_fatal(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Fatal)
    }

    /// True when nothing prevents the commit; notices may remain.
    pub fn is_committable(&self) -> bool {
        self.issues.iter().all(|i| i.severity() == Severity::Notice)
    }

    pub fn notices(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Notice)
    }

    /// Turns blocking issues into an error, keeping the notices on success.
    pub fn into_result(self, passport: &PassportNumber) -> Result<Vec<ValidationIssue>> {
        if self.is_fatal() {
            return Err(LedgerError::SettledConflict {
                passport: passport.to_string(),
            });
        }
        if !self.is_committable() {
            let message = self
                .issues
                .iter()
                .filter(|i| i.severity() == Severity::Blocking)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(LedgerError::Validation(message));
        }
        Ok(self.issues)
    }
}

/// Checks a proposed amount against the ledger state.
///
/// A settled ledger reports `LedgerSettled` and no amount issue, since no
/// amount can fix it. A floored total due always leaves nothing to pay, so its
/// notice travels with the fatal issue.
pub fn validate_proposed_payment(state: &LedgerState, proposed_amount: Fcfa) -> ValidationReport {
    let mut report = ValidationReport::default();
    let montant_max = state.montant_max();

    if !state.is_discount_locked() && state.is_total_due_floored() {
        report.push(ValidationIssue::TotalDueFloored {
            discounted: state.discounted_price(),
            amount_paid: state.amount_paid_so_far,
        });
    }

    if montant_max == Fcfa::ZERO {
        report.push(ValidationIssue::LedgerSettled);
        return report;
    }

    if !proposed_amount.is_positive() {
        report.push(ValidationIssue::AmountRequired);
    } else if proposed_amount.clamp_to(Fcfa::ZERO, montant_max) != proposed_amount {
        report.push(ValidationIssue::AmountOutOfRange {
            proposed: proposed_amount,
            max: montant_max,
        });
    }

    report
}

/// Full validation of a draft: amount rules plus required fields and the
/// discount lock.
///
/// Discount issues are reported even on a settled ledger, so a discount that
/// settled it is still shown as adjusted.
pub fn validate_draft(state: &LedgerState, draft: &PaymentDraft) -> ValidationReport {
    let mut report = validate_proposed_payment(state, draft.amount);

    if let Some(proposed) = draft.discount {
        match state.locked_discount {
            Some(locked) if proposed != locked && proposed != Fcfa::ZERO => {
                report.push(ValidationIssue::DiscountLocked { locked, proposed });
            }
            Some(_) => {}
            None if proposed != state.effective_discount => {
                report.push(ValidationIssue::DiscountAdjusted {
                    proposed,
                    applied: state.effective_discount,
                });
            }
            None => {}
        }
    }

    if report.is_fatal() {
        return report;
    }

    if draft.method.is_none() {
        report.push(ValidationIssue::MissingMethod);
    }
    if draft.date.is_none() {
        report.push(ValidationIssue::MissingDate);
    }

    report
}

/// The payment and its companion installment, built together.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LedgerEntry {
    pub payment: PaymentRecord,
    pub installment: InstallmentRecord,
}

/// Shapes the records for a payment of `amount` against `state`.
///
/// The amount is clamped to `[0, montant_max]`; callers are expected to have
/// rejected out-of-range input through [`validate_draft`] first. A settled
/// ledger is refused outright.
pub fn commit_payment(
    state: &LedgerState,
    passport: &PassportNumber,
    amount: Fcfa,
    method: PaymentMethod,
    date: NaiveDate,
) -> Result<LedgerEntry> {
    let montant_max = state.montant_max();
    if montant_max == Fcfa::ZERO {
        return Err(LedgerError::SettledConflict {
            passport: passport.to_string(),
        });
    }

    let pay_safe = amount.clamp_to(Fcfa::ZERO, montant_max);
    if !pay_safe.is_positive() {
        return Err(LedgerError::Validation(
            ValidationIssue::AmountRequired.to_string(),
        ));
    }
    let remaining_after = state.remaining_before.saturating_sub_floor(pay_safe);

    let payment = PaymentRecord {
        reference: Reference::for_ledger(passport, state.payment_count + 1),
        passport: passport.clone(),
        method,
        amount_paid: pay_safe,
        total_due_at_time: state.total_due,
        discount: if state.is_discount_locked() {
            Fcfa::ZERO
        } else {
            state.effective_discount
        },
        date,
        status: PaymentStatus::from_remaining(remaining_after),
    };
    let installment = InstallmentRecord {
        passport: passport.clone(),
        due_date: date,
        amount_paid: pay_safe,
        remaining_after,
        status: InstallmentStatus::from_remaining(remaining_after),
    };

    Ok(LedgerEntry {
        payment,
        installment,
    })
}
