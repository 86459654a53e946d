use crate::domain::report::LedgerSummary;
use crate::error::Result;
use std::io::Write;

/// Writes ledger summaries as CSV.
///
/// Header: `passport,package_price,discount,total_due,paid,remaining,status`.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summaries<I>(&mut self, summaries: I) -> Result<()>
    where
        I: IntoIterator<Item = LedgerSummary>,
    {
        for summary in summaries {
            self.writer.serialize(summary)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
