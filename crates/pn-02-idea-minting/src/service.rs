//! # Idea Minting Service

use crate::domain::{
    prepare_circuit_input, MintError, MintOutcome, MintReceipt, MintRequest, MintingConfig,
    ProofCalldata,
};
use crate::ports::{IdeaMintingApi, MintSubmitter, ProofGenerator};
use async_trait::async_trait;
use pn_01_event_index::{decode_registration, EventIndexApi, EventKind, RegistrationEvent};
use shared_types::Address;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct IdeaMintingService {
    index: Arc<dyn EventIndexApi>,
    prover: Arc<dyn ProofGenerator>,
    submitter: Arc<dyn MintSubmitter>,
    config: MintingConfig,
}

impl IdeaMintingService {
    pub fn new(
        index: Arc<dyn EventIndexApi>,
        prover: Arc<dyn ProofGenerator>,
        submitter: Arc<dyn MintSubmitter>,
        config: MintingConfig,
    ) -> Self {
        Self {
            index,
            prover,
            submitter,
            config,
        }
    }

    /// First decodable `IdeaProven` log emitted by the contract.
    fn find_registration(&self, receipt: &MintReceipt) -> Option<RegistrationEvent> {
        let topic = EventKind::Registration.topic();
        receipt
            .logs
            .iter()
            .filter(|log| log.address == self.config.contract_address)
            .filter(|log| log.signature() == Some(&topic))
            .find_map(|log| match decode_registration(log) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(tx = ?receipt.transaction_hash, "Undecodable IdeaProven log: {}", e);
                    None
                }
            })
    }
}

#[async_trait]
impl IdeaMintingApi for IdeaMintingService {
    async fn mint(&self, request: MintRequest) -> Result<MintOutcome, MintError> {
        let input = prepare_circuit_input(&request.idea)?;

        let started = Instant::now();
        let calldata = self.prover.prove(&input).await?;
        info!(
            fingerprint = %calldata.fingerprint(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[pn-02] Proof generated"
        );

        self.mint_with_calldata(request.owner, calldata).await
    }

    async fn mint_with_calldata(
        &self,
        owner: Address,
        calldata: ProofCalldata,
    ) -> Result<MintOutcome, MintError> {
        let fingerprint = calldata.fingerprint();

        if self.index.exists(&fingerprint).await? {
            debug!(fingerprint = %fingerprint, "Rejecting duplicate idea");
            return Err(MintError::Duplicate { fingerprint });
        }

        let transaction_hash = self.submitter.submit_mint(owner, &calldata).await?;
        info!(tx = ?transaction_hash, owner = ?owner, "[pn-02] Mint submitted, awaiting confirmation");

        let receipt = self.submitter.await_confirmation(transaction_hash).await?;
        info!(
            tx = ?receipt.transaction_hash,
            block = receipt.block_number,
            "[pn-02] Mint confirmed"
        );

        // The mint is on-chain now; cached history is stale whatever the
        // receipt contains.
        self.index.invalidate().await;

        let event = self
            .find_registration(&receipt)
            .ok_or(MintError::EventMissing {
                transaction_hash: receipt.transaction_hash,
            })?;

        info!(token_id = %event.token_id.to_dec_string(), "[pn-02] Patent minted");

        Ok(MintOutcome {
            token_id: event.token_id,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            fingerprint: event.fingerprint,
        })
    }
}
