//! # Patent-Notary Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fake_chain.rs   # in-process JSON-RPC node emulating the patent contract
//!     └── flows.rs        # HTTP → minting → ledger → index round trips
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pn-tests
//! cargo test -p pn-tests integration::flows
//! ```

pub mod integration;
