use super::workflow::{
    LedgerEntry, PaymentDraft, ValidationIssue, ValidationReport, commit_payment, validate_draft,
};
use crate::domain::installment::InstallmentRecord;
use crate::domain::ledger::{LedgerStage, LedgerState, compute_state};
use crate::domain::money::Fcfa;
use crate::domain::offer::{PackageOffer, PassportNumber};
use crate::domain::payment::PaymentRecord;
use crate::domain::ports::{OfferCatalogBox, PaymentRepositoryBox};
use crate::domain::report::{LedgerSummary, MethodBreakdown};
use crate::error::{LedgerError, Result};
use tracing::{debug, info};

/// Result of a successful commit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CommitOutcome {
    pub entry: LedgerEntry,
    /// Non-blocking adjustments the user should be told about.
    pub notices: Vec<ValidationIssue>,
}

/// Everything recorded for one passport.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LedgerStatement {
    pub offer: PackageOffer,
    pub payments: Vec<PaymentRecord>,
    pub installments: Vec<InstallmentRecord>,
    pub state: LedgerState,
}

impl LedgerStatement {
    pub fn stage(&self) -> LedgerStage {
        self.state.stage()
    }

    pub fn breakdown(&self) -> MethodBreakdown {
        MethodBreakdown::from_payments(&self.payments)
    }
}

/// Entry point for reading and recording pilgrim payments.
///
/// `LedgerService` owns the storage ports. Every operation re-reads the
/// passport's history from the repository, so the service holds no ledger
/// state of its own and a failed append leaves nothing to undo.
pub struct LedgerService {
    payments: PaymentRepositoryBox,
    offers: OfferCatalogBox,
}

impl LedgerService {
    /// Creates a new `LedgerService`.
    ///
    /// # Arguments
    ///
    /// * `payments` - The append-only store of payments and installments.
    /// * `offers` - The catalog supplying package prices.
    pub fn new(payments: PaymentRepositoryBox, offers: OfferCatalogBox) -> Self {
        Self { payments, offers }
    }

    async fn offer(&self, passport: &PassportNumber) -> Result<PackageOffer> {
        self.offers
            .get(passport)
            .await?
            .ok_or_else(|| LedgerError::UnknownOffer(passport.to_string()))
    }

    /// Current balance state of a passport's ledger.
    pub async fn snapshot(
        &self,
        passport: &PassportNumber,
        proposed_discount: Option<Fcfa>,
    ) -> Result<LedgerState> {
        let offer = self.offer(passport).await?;
        let prior = self.payments.list_payments_by_passport(passport).await?;
        Ok(compute_state(offer.package_price, &prior, proposed_discount))
    }

    /// Validates a draft without persisting anything.
    pub async fn preview(&self, draft: &PaymentDraft) -> Result<(LedgerState, ValidationReport)> {
        let passport = PassportNumber::parse(&draft.passport)?;
        let state = self.snapshot(&passport, draft.discount).await?;
        let report = validate_draft(&state, draft);
        Ok((state, report))
    }

    /// Validates and records a payment with its installment.
    ///
    /// Both records are built before the store is touched. A store failure is
    /// returned as is, without retry.
    pub async fn record_payment(&self, draft: PaymentDraft) -> Result<CommitOutcome> {
        let passport = PassportNumber::parse(&draft.passport)?;
        let (state, report) = self.preview(&draft).await?;

        let notices = report.into_result(&passport)?;
        for notice in &notices {
            info!(passport = %passport, notice = %notice, "Payment adjusted");
        }

        let (Some(method), Some(date)) = (draft.method, draft.date) else {
            return Err(LedgerError::Validation(
                "payment method and date are required".to_string(),
            ));
        };
        let entry = commit_payment(&state, &passport, draft.amount, method, date)?;

        self.payments.append_payment(entry.payment.clone()).await?;
        self.payments
            .append_installment(entry.installment.clone())
            .await?;

        info!(
            passport = %passport,
            reference = %entry.payment.reference,
            amount = entry.payment.amount_paid.value(),
            remaining = entry.installment.remaining_after.value(),
            "Payment recorded"
        );
        Ok(CommitOutcome { entry, notices })
    }

    /// Full history and current state of one passport.
    pub async fn statement(&self, passport: &PassportNumber) -> Result<LedgerStatement> {
        let offer = self.offer(passport).await?;
        let payments = self.payments.list_payments_by_passport(passport).await?;
        let installments = self
            .payments
            .list_installments_by_passport(passport)
            .await?;
        let state = compute_state(offer.package_price, &payments, None);
        Ok(LedgerStatement {
            offer,
            payments,
            installments,
            state,
        })
    }

    /// Balance overview of every offer in the catalog, sorted by passport.
    pub async fn summaries(&self) -> Result<Vec<LedgerSummary>> {
        let mut offers = self.offers.all_offers().await?;
        offers.sort_by(|a, b| a.passport.cmp(&b.passport));

        let mut summaries = Vec::with_capacity(offers.len());
        for offer in offers {
            let payments = self
                .payments
                .list_payments_by_passport(&offer.passport)
                .await?;
            let state = compute_state(offer.package_price, &payments, None);
            debug!(passport = %offer.passport, stage = ?state.stage(), "Ledger summarized");
            summaries.push(LedgerSummary::new(&offer, &state));
        }
        Ok(summaries)
    }
}
