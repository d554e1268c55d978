//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `IdeaMintingApi`, used by the gateway
//! - **Driven Ports (Outbound)**: `ProofGenerator`, `MintSubmitter`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
