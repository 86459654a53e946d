//! Application layer orchestrating the ledger workflow.
//!
//! `workflow` holds the pure validation and record-shaping rules; `service`
//! wires them to the storage ports.

pub mod service;
pub mod workflow;
