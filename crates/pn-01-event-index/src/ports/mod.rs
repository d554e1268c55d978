//! # Ports Layer
//!
//! Hexagonal architecture ports for the Event Index subsystem.
//!
//! - **Driving Ports (Inbound)**: `EventIndexApi`, used by minting and the gateway
//! - **Driven Ports (Outbound)**: `LedgerReader`, implemented by the node runtime

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
