//! Contract transactions: build, sign, send, confirm.

use crate::abi;
use crate::client::EthRpcClient;
use crate::config::RpcConfig;
use crate::error::{IdeaHashError, RpcError, WriteError};
use crate::signer::{LegacyTransaction, TransactionSigner};
use shared_types::{Address, Bytes, CallRequest, Hash, TransactionReceipt, U256};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct ContractWriter {
    client: Arc<EthRpcClient>,
    signer: TransactionSigner,
    contract: Address,
    poll_interval: Duration,
    confirmation_timeout: Duration,
    gas_margin_percent: u64,
    /// Serializes nonce lookup and broadcast so concurrent sends do not
    /// reuse a pending nonce.
    send_lock: Mutex<()>,
}

impl ContractWriter {
    pub fn new(
        client: Arc<EthRpcClient>,
        signer: TransactionSigner,
        contract: Address,
        config: &RpcConfig,
    ) -> Self {
        Self {
            client,
            signer,
            contract,
            poll_interval: config.poll_interval,
            confirmation_timeout: config.confirmation_timeout,
            gas_margin_percent: config.gas_margin_percent,
            send_lock: Mutex::new(()),
        }
    }

    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Send `data` to the contract. Returns the transaction hash.
    pub async fn send(&self, data: Vec<u8>) -> Result<Hash, WriteError> {
        let from = self.signer.address();
        let _guard = self.send_lock.lock().await;

        let nonce = self.client.transaction_count(from).await?;
        let gas_price = self.client.gas_price().await?;
        let estimate = self
            .client
            .estimate_gas(&CallRequest {
                from: Some(from),
                to: Some(self.contract),
                data: Some(Bytes::from_slice(&data)),
                ..Default::default()
            })
            .await?;
        let gas_limit = with_margin(estimate, self.gas_margin_percent);
        debug!(nonce, gas_price = %gas_price, gas_limit = %gas_limit, "Prepared contract transaction");

        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to: Some(self.contract),
            value: U256::ZERO,
            data,
        };
        let signed = self.signer.sign_legacy(&tx)?;
        let hash = self.client.send_raw_transaction(&signed.raw).await?;
        if hash != signed.hash {
            warn!(node = ?hash, local = ?signed.hash, "Node reported a different transaction hash");
        }
        info!(tx = ?hash, nonce, "Transaction broadcast");
        Ok(hash)
    }

    /// Poll for the receipt until it appears or the confirmation timeout
    /// elapses. A receipt with status 0 is an error.
    pub async fn wait_for_receipt(&self, hash: Hash) -> Result<TransactionReceipt, WriteError> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.client.transaction_receipt(hash).await? {
                if !receipt.is_success() {
                    return Err(WriteError::Reverted {
                        transaction_hash: hash,
                        block_number: receipt.block_number,
                    });
                }
                return Ok(receipt);
            }

            let waited = started.elapsed();
            if waited >= self.confirmation_timeout {
                return Err(WriteError::ConfirmationTimeout {
                    transaction_hash: hash,
                    waited,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Read-only call against the contract.
    pub async fn call(&self, data: Vec<u8>) -> Result<Bytes, RpcError> {
        self.client
            .call_contract(&CallRequest {
                to: Some(self.contract),
                data: Some(Bytes(data)),
                ..Default::default()
            })
            .await
    }

    /// `mintWithProof(owner, a, b, c, input)`.
    pub async fn mint_with_proof(
        &self,
        owner: &Address,
        proof: &[U256; 10],
    ) -> Result<Hash, WriteError> {
        self.send(abi::encode_mint_with_proof(owner, proof)).await
    }

    /// `tokenIdToIdeaHash(token_id)`. Unknown tokens read as `[0, 0]`.
    pub async fn idea_hash_of(&self, token_id: &U256) -> Result<[U256; 2], IdeaHashError> {
        let ret = self
            .call(abi::encode_token_id_to_idea_hash(token_id))
            .await?;
        Ok(abi::decode_idea_hash(ret.as_slice())?)
    }
}

fn with_margin(estimate: U256, percent: u64) -> U256 {
    let scaled = estimate.saturating_mul(U256::from(100 + percent));
    scaled.checked_div(U256::from(100u64)).unwrap_or(estimate)
}
