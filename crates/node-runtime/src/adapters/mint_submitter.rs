//! `MintSubmitter` backed by a signing [`ContractWriter`].

use async_trait::async_trait;
use pn_02_idea_minting::{MintReceipt, MintSubmitter, ProofCalldata, SubmissionError};
use pn_03_ledger_rpc::{ContractWriter, WriteError};
use shared_types::{Address, Hash, TransactionReceipt};
use std::sync::Arc;
use tracing::info;

pub struct RpcMintSubmitter {
    writer: Arc<ContractWriter>,
}

impl RpcMintSubmitter {
    pub fn new(writer: Arc<ContractWriter>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl MintSubmitter for RpcMintSubmitter {
    async fn submit_mint(
        &self,
        owner: Address,
        calldata: &ProofCalldata,
    ) -> Result<Hash, SubmissionError> {
        let hash = self
            .writer
            .mint_with_proof(&owner, &calldata.words())
            .await
            .map_err(write_error_to_submission)?;
        info!(tx = ?hash, sender = ?self.writer.sender(), "[runtime] mintWithProof broadcast");
        Ok(hash)
    }

    async fn await_confirmation(
        &self,
        transaction_hash: Hash,
    ) -> Result<MintReceipt, SubmissionError> {
        self.writer
            .wait_for_receipt(transaction_hash)
            .await
            .map(receipt_to_mint_receipt)
            .map_err(write_error_to_submission)
    }
}

pub fn receipt_to_mint_receipt(receipt: TransactionReceipt) -> MintReceipt {
    MintReceipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        logs: receipt.logs,
    }
}

pub fn write_error_to_submission(e: WriteError) -> SubmissionError {
    match e {
        WriteError::Rpc(e) => SubmissionError::Rpc(e.to_string()),
        WriteError::Signer(e) => SubmissionError::Signing(e.to_string()),
        WriteError::Reverted {
            transaction_hash, ..
        } => SubmissionError::Reverted { transaction_hash },
        WriteError::ConfirmationTimeout {
            transaction_hash,
            waited,
        } => SubmissionError::ConfirmationTimeout {
            transaction_hash,
            waited_secs: waited.as_secs(),
        },
    }
}
