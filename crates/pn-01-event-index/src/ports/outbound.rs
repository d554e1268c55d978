//! # Outbound Ports (Driven Ports)
//!
//! SPI required by the Event Index subsystem.

use crate::domain::LedgerReadError;
use async_trait::async_trait;
use shared_types::{LogEntry, LogQuery};

/// Historical log access on the ledger.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Every log matching `query`, in the order the ledger reports them
    /// (ascending block, then log index).
    async fn get_logs(&self, query: LogQuery) -> Result<Vec<LogEntry>, LedgerReadError>;
}
