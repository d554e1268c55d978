//! # Node Configuration
//!
//! Everything the runtime needs, loaded from `PN_*` environment variables.
//!
//! ## Security Requirements
//!
//! - The minter key is never printed; `Debug` redacts it.
//! - Missing required variables abort startup instead of falling back.

use pn_03_ledger_rpc::RpcConfig;
use pn_04_api_gateway::GatewayConfig;
use shared_types::{Address, BlockNumber};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_RPC_URL: &str = "PN_RPC_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "PN_CONTRACT_ADDRESS";
pub const ENV_MINTER_PRIVATE_KEY: &str = "PN_MINTER_PRIVATE_KEY";
pub const ENV_GENESIS_BLOCK: &str = "PN_GENESIS_BLOCK";
pub const ENV_HTTP_HOST: &str = "PN_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "PN_HTTP_PORT";
pub const ENV_RPC_TIMEOUT_SECS: &str = "PN_RPC_TIMEOUT_SECS";
pub const ENV_RECEIPT_POLL_MS: &str = "PN_RECEIPT_POLL_MS";
pub const ENV_CONFIRMATION_TIMEOUT_SECS: &str = "PN_CONFIRMATION_TIMEOUT_SECS";
pub const ENV_CIRCUIT_WASM: &str = "PN_CIRCUIT_WASM";
pub const ENV_CIRCUIT_ZKEY: &str = "PN_CIRCUIT_ZKEY";
pub const ENV_SNARKJS_BIN: &str = "PN_SNARKJS_BIN";
pub const ENV_SUMMARIZER_URL: &str = "PN_SUMMARIZER_URL";
pub const ENV_SUMMARIZER_API_KEY: &str = "PN_SUMMARIZER_API_KEY";
pub const ENV_SUMMARIZER_MODEL: &str = "PN_SUMMARIZER_MODEL";
pub const ENV_SUMMARIZER_PROMPT: &str = "PN_SUMMARIZER_PROMPT";
pub const ENV_SUMMARIZER_TIMEOUT_SECS: &str = "PN_SUMMARIZER_TIMEOUT_SECS";

/// Complete node configuration.
#[derive(Clone)]
pub struct NodeConfig {
    /// Ledger endpoint, timeouts and gas margin.
    pub rpc: RpcConfig,
    /// Patent NFT contract.
    pub contract_address: Address,
    /// Hex secp256k1 key of the account that pays for mints.
    pub minter_private_key: String,
    /// First block the event index scans.
    pub genesis_block: BlockNumber,
    pub gateway: GatewayConfig,
    pub prover: ProverConfig,
    /// Document summarization for `/api/submit`; off unless a URL is set.
    pub summarizer: Option<SummarizerConfig>,
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("rpc", &self.rpc)
            .field("contract_address", &self.contract_address)
            .field("minter_private_key", &"<redacted>")
            .field("genesis_block", &self.genesis_block)
            .field("gateway", &self.gateway)
            .field("prover", &self.prover)
            .field("summarizer", &self.summarizer)
            .finish()
    }
}

/// snarkjs invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
    pub snarkjs_bin: PathBuf,
    pub wasm_path: PathBuf,
    pub zkey_path: PathBuf,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            snarkjs_bin: PathBuf::from("snarkjs"),
            wasm_path: PathBuf::from("circuits/build/hash_preimage_js/hash_preimage.wasm"),
            zkey_path: PathBuf::from("circuits/build/hash_preimage_0001.zkey"),
        }
    }
}

/// Placeholder replaced by the document text in the prompt template.
pub const DOCUMENT_PLACEHOLDER: &str = "{document}";

const DEFAULT_SUMMARIZER_PROMPT: &str = "State the core inventive concept of the following \
patent document as one technically precise sentence describing its mechanism, process or \
structure. Reply with that sentence only.\n\n---\n{document}\n---";

/// OpenAI-compatible chat completion endpoint used to condense documents.
#[derive(Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Full chat completions URL.
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Prompt text; [`DOCUMENT_PLACEHOLDER`] marks where the document goes.
    pub prompt_template: String,
    pub timeout: Duration,
}

impl SummarizerConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            model: "gemini-2.0-flash-lite".to_string(),
            prompt_template: DEFAULT_SUMMARIZER_PROMPT.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mut rpc = RpcConfig::new(required(ENV_RPC_URL)?);
        if let Some(secs) = parse_opt::<u64>(ENV_RPC_TIMEOUT_SECS, get(ENV_RPC_TIMEOUT_SECS))? {
            rpc.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_opt::<u64>(ENV_RECEIPT_POLL_MS, get(ENV_RECEIPT_POLL_MS))? {
            rpc.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_opt::<u64>(
            ENV_CONFIRMATION_TIMEOUT_SECS,
            get(ENV_CONFIRMATION_TIMEOUT_SECS),
        )? {
            rpc.confirmation_timeout = Duration::from_secs(secs);
        }

        let contract_address = parse_address(&required(ENV_CONTRACT_ADDRESS)?)?;
        let minter_private_key = required(ENV_MINTER_PRIVATE_KEY)?;
        let genesis_block =
            parse_opt::<BlockNumber>(ENV_GENESIS_BLOCK, get(ENV_GENESIS_BLOCK))?.unwrap_or(0);

        let mut gateway = GatewayConfig::default();
        if let Some(host) = parse_opt(ENV_HTTP_HOST, get(ENV_HTTP_HOST))? {
            gateway.http.host = host;
        }
        if let Some(port) = parse_opt(ENV_HTTP_PORT, get(ENV_HTTP_PORT))? {
            gateway.http.port = port;
        }

        let mut prover = ProverConfig::default();
        if let Some(bin) = get(ENV_SNARKJS_BIN) {
            prover.snarkjs_bin = PathBuf::from(bin);
        }
        if let Some(wasm) = get(ENV_CIRCUIT_WASM) {
            prover.wasm_path = PathBuf::from(wasm);
        }
        if let Some(zkey) = get(ENV_CIRCUIT_ZKEY) {
            prover.zkey_path = PathBuf::from(zkey);
        }

        let summarizer = match get(ENV_SUMMARIZER_URL) {
            None => None,
            Some(url) => {
                let mut summarizer = SummarizerConfig::new(url.trim());
                summarizer.api_key = get(ENV_SUMMARIZER_API_KEY);
                if let Some(model) = get(ENV_SUMMARIZER_MODEL) {
                    summarizer.model = model;
                }
                if let Some(prompt) = get(ENV_SUMMARIZER_PROMPT) {
                    summarizer.prompt_template = prompt;
                }
                if let Some(secs) =
                    parse_opt::<u64>(ENV_SUMMARIZER_TIMEOUT_SECS, get(ENV_SUMMARIZER_TIMEOUT_SECS))?
                {
                    summarizer.timeout = Duration::from_secs(secs);
                }
                Some(summarizer)
            }
        };

        Ok(Self {
            rpc,
            contract_address,
            minter_private_key,
            genesis_block,
            gateway,
            prover,
            summarizer,
        })
    }

    /// Checks that do not need the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_zero() {
            return Err(ConfigError::Invalid {
                var: ENV_CONTRACT_ADDRESS,
                reason: "contract address cannot be zero".into(),
            });
        }
        if self.rpc.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: ENV_RECEIPT_POLL_MS,
                reason: "poll interval must be positive".into(),
            });
        }
        self.gateway
            .validate()
            .map_err(|e| ConfigError::Gateway(e.to_string()))
    }
}

fn parse_opt<T: FromStr>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("{:?}: {}", value, e),
        })
    })
    .transpose()
}

fn parse_address(raw: &str) -> Result<Address, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: ENV_CONTRACT_ADDRESS,
        reason,
    };
    let trimmed = raw.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .map_err(|e| invalid(format!("{:?}: {}", raw, e)))?;
    if bytes.len() != 20 {
        return Err(invalid(format!("expected 20 bytes, got {}", bytes.len())));
    }
    Ok(Address::from_slice(&bytes))
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("gateway configuration: {0}")]
    Gateway(String),
}
