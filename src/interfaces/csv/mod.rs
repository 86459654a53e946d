//! CSV adapters: offer catalog and payment entry imports, summary export.

pub mod offer_reader;
pub mod payment_draft_reader;
pub mod summary_writer;
