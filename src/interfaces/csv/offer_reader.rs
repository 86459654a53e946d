use crate::domain::money::Fcfa;
use crate::domain::offer::{PackageOffer, PassportNumber};
use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct OfferRow {
    passport: String,
    package_price: Fcfa,
}

/// Reads the offer catalog export (`passport, package_price`).
pub struct OfferReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OfferReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator over validated offers; malformed rows yield errors
    /// without stopping the stream.
    pub fn offers(self) -> impl Iterator<Item = Result<PackageOffer>> {
        self.reader.into_deserialize().map(|result| {
            let row: OfferRow = result.map_err(LedgerError::from)?;
            PackageOffer::new(PassportNumber::parse(&row.passport)?, row.package_price)
        })
    }
}
