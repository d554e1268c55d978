//! # Node Container
//!
//! Builds every subsystem and adapter in dependency order and holds them for
//! the lifetime of the process.
//!
//! ```text
//! EthRpcClient ──→ RpcLedgerReader ──→ EventIndexService (pn-01)
//!      │                                      │
//!      └─→ ContractWriter ──→ RpcMintSubmitter │
//!               │                    ↓         ↓
//!               │            IdeaMintingService (pn-02) ←── SnarkjsProver
//!               ↓                    │
//!   ContractFingerprintReader ──→ ApiGatewayService (pn-04) ←── HttpIdeaSummarizer
//! ```

pub mod config;

pub use config::{ConfigError, NodeConfig, ProverConfig, SummarizerConfig};

use crate::adapters::{
    ContractFingerprintReader, HttpIdeaSummarizer, RpcLedgerReader, RpcMintSubmitter,
    SnarkjsProver,
};
use pn_01_event_index::{EventIndexService, IndexConfig};
use pn_02_idea_minting::{IdeaMintingService, MintingConfig, ProofGenerator};
use pn_03_ledger_rpc::{ContractWriter, EthRpcClient, RpcError, SignerError, TransactionSigner};
use pn_04_api_gateway::{ApiGatewayService, AppState, GatewayError, IdeaSummarizer};
use std::sync::Arc;
use tracing::{info, warn};

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("ledger unavailable: {0}")]
    Rpc(#[from] RpcError),

    #[error("minter key rejected: {0}")]
    Signer(#[from] SignerError),

    #[error("summarizer client: {0}")]
    Summarizer(#[from] reqwest::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// All wired services.
pub struct NodeContainer {
    pub config: NodeConfig,
    pub client: Arc<EthRpcClient>,
    pub writer: Arc<ContractWriter>,
    pub index: Arc<EventIndexService>,
    pub minting: Arc<IdeaMintingService>,
    pub fingerprints: Arc<ContractFingerprintReader>,
    pub summarizer: Option<Arc<HttpIdeaSummarizer>>,
}

impl NodeContainer {
    /// Wire everything with the snarkjs prover.
    pub async fn connect(config: NodeConfig) -> Result<Self, ContainerError> {
        let prover = SnarkjsProver::new(config.prover.clone());
        if let Err(e) = prover.check_artifacts() {
            warn!(
                "[runtime] {}; /api/mint will fail until the artifacts exist",
                e
            );
        }
        Self::connect_with_prover(config, Arc::new(prover)).await
    }

    /// Wire everything around the given prover. Fetches the chain id from
    /// the ledger so transactions are signed for the right network.
    pub async fn connect_with_prover(
        config: NodeConfig,
        prover: Arc<dyn ProofGenerator>,
    ) -> Result<Self, ContainerError> {
        config.validate()?;

        let client = Arc::new(EthRpcClient::new(
            config.rpc.url.clone(),
            config.rpc.request_timeout,
        )?);
        let chain_id = client.chain_id().await?;
        let signer = TransactionSigner::from_hex(&config.minter_private_key, chain_id)?;
        info!(
            chain_id,
            minter = ?signer.address(),
            contract = ?config.contract_address,
            "[runtime] connected to ledger"
        );

        let writer = Arc::new(ContractWriter::new(
            Arc::clone(&client),
            signer,
            config.contract_address,
            &config.rpc,
        ));

        // Level 0: read side
        let index = Arc::new(EventIndexService::new(
            Arc::new(RpcLedgerReader::new(Arc::clone(&client))),
            IndexConfig::new(config.contract_address).with_genesis_block(config.genesis_block),
        ));

        // Level 1: write side, depends on the index for duplicate checks
        let minting = Arc::new(IdeaMintingService::new(
            index.clone(),
            prover,
            Arc::new(RpcMintSubmitter::new(Arc::clone(&writer))),
            MintingConfig::new(config.contract_address),
        ));

        let fingerprints = Arc::new(ContractFingerprintReader::new(Arc::clone(&writer)));

        let summarizer = match &config.summarizer {
            Some(settings) => {
                info!(model = %settings.model, "[runtime] document summarization enabled");
                Some(Arc::new(HttpIdeaSummarizer::new(settings.clone())?))
            }
            None => {
                info!("[runtime] document summarization disabled; /api/submit answers 503");
                None
            }
        };

        Ok(Self {
            config,
            client,
            writer,
            index,
            minting,
            fingerprints,
            summarizer,
        })
    }

    pub fn gateway_state(&self) -> AppState {
        AppState {
            index: self.index.clone(),
            minting: self.minting.clone(),
            fingerprints: self.fingerprints.clone(),
            summarizer: self
                .summarizer
                .clone()
                .map(|s| s as Arc<dyn IdeaSummarizer>),
        }
    }

    pub fn gateway(&self) -> Result<ApiGatewayService, ContainerError> {
        Ok(ApiGatewayService::new(
            self.config.gateway.clone(),
            self.gateway_state(),
        )?)
    }
}
