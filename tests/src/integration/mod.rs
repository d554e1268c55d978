//! Cross-crate flows over the real adapters and a fake ledger.

pub mod fake_chain;
pub mod flows;
