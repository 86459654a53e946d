//! Ledger domain: value objects, records, the balance calculator and the
//! storage ports the application layer depends on.

pub mod installment;
pub mod ledger;
pub mod money;
pub mod offer;
pub mod payment;
pub mod ports;
pub mod report;
