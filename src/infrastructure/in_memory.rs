use crate::domain::installment::InstallmentRecord;
use crate::domain::offer::{PackageOffer, PassportNumber};
use crate::domain::payment::PaymentRecord;
use crate::domain::ports::{OfferCatalog, PaymentRepository};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Ledgers {
    payments: HashMap<PassportNumber, Vec<PaymentRecord>>,
    installments: HashMap<PassportNumber, Vec<InstallmentRecord>>,
}

/// A thread-safe in-memory ledger store.
///
/// Entries are kept per passport in insertion order. `Clone` shares the
/// underlying map, which lets tests inspect what a service wrote.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    ledgers: Arc<RwLock<Ledgers>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn list_payments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<PaymentRecord>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.payments.get(passport).cloned().unwrap_or_default())
    }

    async fn list_installments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<InstallmentRecord>> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers
            .installments
            .get(passport)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_payment(&self, payment: PaymentRecord) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        ledgers
            .payments
            .entry(payment.passport.clone())
            .or_default()
            .push(payment);
        Ok(())
    }

    async fn append_installment(&self, installment: InstallmentRecord) -> Result<()> {
        let mut ledgers = self.ledgers.write().await;
        ledgers
            .installments
            .entry(installment.passport.clone())
            .or_default()
            .push(installment);
        Ok(())
    }
}

/// In-memory offer catalog, usually loaded from a CSV export.
#[derive(Clone)]
pub struct InMemoryOfferCatalog {
    offers: Arc<RwLock<HashMap<PassportNumber, PackageOffer>>>,
}

impl InMemoryOfferCatalog {
    /// Builds a catalog from `offers`; a later offer for the same passport
    /// replaces an earlier one.
    pub fn from_offers<I>(offers: I) -> Self
    where
        I: IntoIterator<Item = PackageOffer>,
    {
        let map = offers
            .into_iter()
            .map(|offer| (offer.passport.clone(), offer))
            .collect();
        Self {
            offers: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl OfferCatalog for InMemoryOfferCatalog {
    async fn get(&self, passport: &PassportNumber) -> Result<Option<PackageOffer>> {
        let offers = self.offers.read().await;
        Ok(offers.get(passport).cloned())
    }

    async fn all_offers(&self) -> Result<Vec<PackageOffer>> {
        let offers = self.offers.read().await;
        Ok(offers.values().cloned().collect())
    }
}
