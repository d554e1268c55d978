//! # Port Adapters
//!
//! Connect subsystem ports to the outside world:
//!
//! | Port | Adapter | Backend |
//! |------|---------|---------|
//! | `LedgerReader` (pn-01) | `RpcLedgerReader` | `eth_getLogs` |
//! | `MintSubmitter` (pn-02) | `RpcMintSubmitter` | signed `mintWithProof` + receipt polling |
//! | `ProofGenerator` (pn-02) | `SnarkjsProver` | `snarkjs` CLI |
//! | `FingerprintLookup` (pn-04) | `ContractFingerprintReader` | `tokenIdToIdeaHash` via `eth_call` |
//! | `IdeaSummarizer` (pn-04) | `HttpIdeaSummarizer` | OpenAI-compatible chat completions |

pub mod fingerprint_reader;
pub mod ledger_reader;
pub mod llm_summarizer;
pub mod mint_submitter;
pub mod snarkjs_prover;

pub use fingerprint_reader::ContractFingerprintReader;
pub use ledger_reader::RpcLedgerReader;
pub use llm_summarizer::HttpIdeaSummarizer;
pub use mint_submitter::{receipt_to_mint_receipt, write_error_to_submission, RpcMintSubmitter};
pub use snarkjs_prover::SnarkjsProver;
