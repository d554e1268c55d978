//! # Node Runtime Library
//!
//! Configuration, adapters and wiring for the `patent-notary` binary,
//! exposed as a library for integration tests.
//!
//! - `container/`: environment configuration and dependency wiring
//! - `adapters/`: port implementations backed by JSON-RPC, snarkjs and an
//!   LLM endpoint

pub mod adapters;
pub mod container;

pub use container::{
    ConfigError, ContainerError, NodeConfig, NodeContainer, ProverConfig, SummarizerConfig,
};
