//! `LedgerReader` over JSON-RPC.

use async_trait::async_trait;
use pn_01_event_index::{LedgerReadError, LedgerReader};
use pn_03_ledger_rpc::EthRpcClient;
use shared_types::{LogEntry, LogQuery};
use std::sync::Arc;
use tracing::debug;

pub struct RpcLedgerReader {
    client: Arc<EthRpcClient>,
}

impl RpcLedgerReader {
    pub fn new(client: Arc<EthRpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LedgerReader for RpcLedgerReader {
    async fn get_logs(&self, query: LogQuery) -> Result<Vec<LogEntry>, LedgerReadError> {
        debug!(
            from = %query.from_block.as_param(),
            to = %query.to_block.as_param(),
            "[runtime] eth_getLogs"
        );
        self.client
            .get_logs(&query)
            .await
            .map_err(|e| LedgerReadError::new(e.to_string()))
    }
}
