#![allow(dead_code)]

use bmvt_ledger::application::service::LedgerService;
use bmvt_ledger::application::workflow::PaymentDraft;
use bmvt_ledger::domain::money::Fcfa;
use bmvt_ledger::domain::offer::{PackageOffer, PassportNumber};
use bmvt_ledger::domain::payment::PaymentMethod;
use bmvt_ledger::infrastructure::in_memory::{InMemoryOfferCatalog, InMemoryPaymentRepository};
use chrono::NaiveDate;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub fn offer(passport: &str, price: i64) -> PackageOffer {
    PackageOffer::new(PassportNumber::parse(passport).unwrap(), Fcfa::new(price)).unwrap()
}

pub fn draft(passport: &str, amount: i64, discount: Option<i64>) -> PaymentDraft {
    PaymentDraft {
        passport: passport.to_string(),
        amount: Fcfa::new(amount),
        method: Some(PaymentMethod::Cash),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        discount: discount.map(Fcfa::new),
    }
}

pub fn in_memory_service(offers: Vec<PackageOffer>) -> LedgerService {
    LedgerService::new(
        Box::new(InMemoryPaymentRepository::new()),
        Box::new(InMemoryOfferCatalog::from_offers(offers)),
    )
}

/// Writes `rows` under `header` into a temporary CSV file.
pub fn csv_file(header: &str, rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{}", header)?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}

pub fn offers_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    csv_file("passport, package_price", rows)
}

pub fn payments_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    csv_file("passport, amount, method, date, discount", rows)
}
