use super::installment::InstallmentRecord;
use super::offer::{PackageOffer, PassportNumber};
use super::payment::PaymentRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only store of ledger entries, keyed by passport.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list_payments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<PaymentRecord>>;
    async fn list_installments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<InstallmentRecord>>;
    async fn append_payment(&self, payment: PaymentRecord) -> Result<()>;
    async fn append_installment(&self, installment: InstallmentRecord) -> Result<()>;
}

/// Read-only source of package prices.
#[async_trait]
pub trait OfferCatalog: Send + Sync {
    async fn get(&self, passport: &PassportNumber) -> Result<Option<PackageOffer>>;
    async fn all_offers(&self) -> Result<Vec<PackageOffer>>;
}

pub type PaymentRepositoryBox = Box<dyn PaymentRepository>;
pub type OfferCatalogBox = Box<dyn OfferCatalog>;
