use crate::domain::installment::InstallmentRecord;
use crate::domain::offer::PassportNumber;
use crate::domain::payment::PaymentRecord;
use crate::domain::ports::PaymentRepository;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for storing installment records.
pub const CF_INSTALLMENTS: &str = "installments";

/// A persistent ledger store backed by RocksDB.
///
/// Keys are `<passport>/<sequence>` with a zero-padded sequence, so a prefix
/// scan returns one passport's entries in append order. Passport numbers are
/// alphanumeric, which keeps the `/` separator unambiguous.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbPaymentRepository {
    db: Arc<DB>,
}

impl RocksDbPaymentRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "payments" and "installments" column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let cf_installments = ColumnFamilyDescriptor::new(CF_INSTALLMENTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments, cf_installments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| LedgerError::Persistence(format!("{} column family not found", name)))
    }

    fn prefix(passport: &PassportNumber) -> Vec<u8> {
        format!("{}/", passport).into_bytes()
    }

    fn scan<T: DeserializeOwned>(&self, name: &str, passport: &PassportNumber) -> Result<Vec<T>> {
        let cf = self.cf(name)?;
        let prefix = Self::prefix(passport);

        let mut records = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward));
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    fn append<T: Serialize>(&self, name: &str, passport: &PassportNumber, record: &T) -> Result<()> {
        let cf = self.cf(name)?;
        let prefix = Self::prefix(passport);

        let mut sequence: u64 = 0;
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward));
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            sequence += 1;
        }

        let key = format!("{}/{:010}", passport, sequence);
        let value = serde_json::to_vec(record)?;
        self.db.put_cf(cf, key, value)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for RocksDbPaymentRepository {
    async fn list_payments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<PaymentRecord>> {
        self.scan(CF_PAYMENTS, passport)
    }

    async fn list_installments_by_passport(
        &self,
        passport: &PassportNumber,
    ) -> Result<Vec<InstallmentRecord>> {
        self.scan(CF_INSTALLMENTS, passport)
    }

    async fn append_payment(&self, payment: PaymentRecord) -> Result<()> {
        self.append(CF_PAYMENTS, &payment.passport, &payment)
    }

    async fn append_installment(&self, installment: InstallmentRecord) -> Result<()> {
        self.append(CF_INSTALLMENTS, &installment.passport, &installment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::installment::InstallmentStatus;
    use crate::domain::money::Fcfa;
    use crate::domain::payment::{PaymentMethod, PaymentStatus, Reference};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn passport(raw: &str) -> PassportNumber {
        PassportNumber::parse(raw).unwrap()
    }

    fn payment(raw: &str, position: usize, amount: i64) -> PaymentRecord {
        PaymentRecord {
            reference: Reference::for_ledger(&passport(raw), position),
            passport: passport(raw),
            method: PaymentMethod::WireTransfer,
            amount_paid: Fcfa::new(amount),
            total_due_at_time: Fcfa::new(1_000),
            discount: Fcfa::ZERO,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: PaymentStatus::Partial,
        }
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDbPaymentRepository::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_PAYMENTS).is_some());
        assert!(store.db.cf_handle(CF_INSTALLMENTS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_payments_scoped_by_passport() {
        let dir = tempdir().unwrap();
        let store = RocksDbPaymentRepository::open(dir.path()).unwrap();

        // "SN1" is a prefix of "SN10"; the separator keeps them apart.
        store.append_payment(payment("SN1", 1, 100)).await.unwrap();
        store.append_payment(payment("SN10", 1, 999)).await.unwrap();
        store.append_payment(payment("SN1", 2, 200)).await.unwrap();

        let listed = store.list_payments_by_passport(&passport("SN1")).await.unwrap();
        assert_eq!(listed, vec![payment("SN1", 1, 100), payment("SN1", 2, 200)]);
        assert_eq!(
            store
                .list_payments_by_passport(&passport("SN10"))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_rocksdb_survives_reopen() {
        let dir = tempdir().unwrap();
        let installment = InstallmentRecord {
            passport: passport("SN1"),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount_paid: Fcfa::new(100),
            remaining_after: Fcfa::ZERO,
            status: InstallmentStatus::Settled,
        };
        {
            let store = RocksDbPaymentRepository::open(dir.path()).unwrap();
            store.append_installment(installment.clone()).await.unwrap();
        }

        let store = RocksDbPaymentRepository::open(dir.path()).unwrap();
        let listed = store
            .list_installments_by_passport(&passport("SN1"))
            .await
            .unwrap();
        assert_eq!(listed, vec![installment]);
    }
}
