//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the Event Index subsystem.

use crate::domain::{Fingerprint, IndexError, IndexStats, MintRecord};
use async_trait::async_trait;

/// Primary API for the Event Index subsystem.
///
/// Reads build their slot lazily; concurrent first reads share one build.
#[async_trait]
pub trait EventIndexApi: Send + Sync {
    /// Whether `fingerprint` was ever registered on-chain.
    ///
    /// ## Returns
    ///
    /// - `Ok(bool)`: membership answer, numerically compared
    /// - `Err(IndexError)`: the registration index could not be built
    async fn exists(&self, fingerprint: &Fingerprint) -> Result<bool, IndexError>;

    /// Minted patents, newest block first, truncated to `limit` when it is
    /// a positive number.
    async fn list(&self, limit: Option<i64>) -> Result<Vec<MintRecord>, IndexError>;

    /// Drop both cached structures. The next read of each rebuilds it.
    ///
    /// Waits for any in-flight build so the result of a build that started
    /// before the call can never be cached after it.
    async fn invalidate(&self);

    /// Snapshot of slot states and counters. Never blocks.
    fn stats(&self) -> IndexStats;
}
