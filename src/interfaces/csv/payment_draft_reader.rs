use crate::application::workflow::PaymentDraft;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads payment entries from a CSV source.
///
/// Expected header: `passport, amount, method, date, discount`. The `method`,
/// `date` and `discount` columns may be left blank; the workflow decides
/// whether a blank value is acceptable.
pub struct PaymentDraftReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentDraftReader<R> {
    /// Creates a new `PaymentDraftReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes payment drafts.
    pub fn drafts(self) -> impl Iterator<Item = Result<PaymentDraft>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
