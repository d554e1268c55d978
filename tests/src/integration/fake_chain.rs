//! # Fake Chain
//!
//! In-process JSON-RPC node emulating the patent contract closely enough for
//! the real adapters to run against it:
//!
//! - `eth_sendRawTransaction` decodes the signed `mintWithProof` call, mines
//!   it into the next block and emits `Transfer(0x0 → owner)` plus
//!   `IdeaProven`.
//! - A fingerprint already registered reverts, as the contract does.
//! - `eth_getLogs` honours address, first topic and `fromBlock`.
//! - `eth_call` answers `tokenIdToIdeaHash`.

use axum::{extract::State, routing::post, Json, Router};
use parking_lot::Mutex;
use pn_01_event_index::{EventKind, Fingerprint};
use pn_03_ledger_rpc::abi;
use rlp::Rlp;
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Bytes, Hash, LogEntry, U256};
use std::collections::HashMap;
use std::sync::Arc;

pub const CHAIN_ID: u64 = 31337;

#[derive(Default)]
struct ChainState {
    block: u64,
    logs: Vec<LogEntry>,
    receipts: HashMap<Hash, Value>,
    /// Fingerprint per token id, in mint order.
    tokens: Vec<Fingerprint>,
    sent: u64,
    get_logs_calls: usize,
    revert_all: bool,
}

pub struct FakeChain {
    contract: Address,
    state: Mutex<ChainState>,
}

impl FakeChain {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            state: Mutex::new(ChainState::default()),
        }
    }

    /// Serve on an ephemeral local port. Returns the node URL.
    pub async fn spawn(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route("/", post(handle))
            .with_state(Arc::clone(self));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Mine a mint directly, bypassing transaction signing.
    pub fn seed_mint(&self, owner: Address, fingerprint: Fingerprint) -> Option<U256> {
        let mut state = self.state.lock();
        let tx = Hash::from_slice(&Keccak256::digest(state.block.to_be_bytes()));
        self.mine_mint(&mut state, owner, fingerprint, tx)
            .map(|(token_id, _)| token_id)
    }

    /// Mine a transfer between two holders.
    pub fn seed_transfer(&self, from: Address, to: Address, token_id: U256) {
        let mut state = self.state.lock();
        state.block += 1;
        let log = self.transfer_log(&state, from, to, token_id, Hash::repeat_byte(0xee));
        state.logs.push(log);
    }

    pub fn advance_blocks(&self, n: u64) {
        self.state.lock().block += n;
    }

    pub fn block_number(&self) -> u64 {
        self.state.lock().block
    }

    pub fn get_logs_calls(&self) -> usize {
        self.state.lock().get_logs_calls
    }

    pub fn sent_transactions(&self) -> u64 {
        self.state.lock().sent
    }

    /// Make every submitted transaction revert.
    pub fn set_revert_all(&self, revert: bool) {
        self.state.lock().revert_all = revert;
    }

    /// Appends the logs of a successful mint. `None` when the contract would
    /// revert.
    fn mine_mint(
        &self,
        state: &mut ChainState,
        owner: Address,
        fingerprint: Fingerprint,
        tx: Hash,
    ) -> Option<(U256, Vec<LogEntry>)> {
        state.block += 1;
        if state.revert_all || state.tokens.contains(&fingerprint) {
            return None;
        }

        state.tokens.push(fingerprint);
        let token_id = U256::from(state.tokens.len() as u64);

        let transfer = self.transfer_log(state, Address::zero(), owner, token_id, tx);
        let mut data = fingerprint.words()[0].to_be_bytes().to_vec();
        data.extend_from_slice(&fingerprint.words()[1].to_be_bytes());
        let proven = LogEntry {
            address: self.contract,
            topics: vec![
                EventKind::Registration.topic(),
                Hash::from_slice(&token_id.to_be_bytes()),
            ],
            data: Bytes::from(data),
            block_number: Some(state.block),
            transaction_hash: Some(tx),
            log_index: Some(1),
            removed: false,
        };

        let logs = vec![transfer, proven];
        state.logs.extend(logs.iter().cloned());
        Some((token_id, logs))
    }

    fn transfer_log(
        &self,
        state: &ChainState,
        from: Address,
        to: Address,
        token_id: U256,
        tx: Hash,
    ) -> LogEntry {
        LogEntry {
            address: self.contract,
            topics: vec![
                EventKind::MintTransfer.topic(),
                address_topic(from),
                address_topic(to),
                Hash::from_slice(&token_id.to_be_bytes()),
            ],
            data: Bytes::new(),
            block_number: Some(state.block),
            transaction_hash: Some(tx),
            log_index: Some(0),
            removed: false,
        }
    }

    fn respond(&self, method: &str, params: &Value) -> Result<Value, (i64, String)> {
        match method {
            "eth_chainId" => Ok(quantity(CHAIN_ID)),
            "eth_blockNumber" => Ok(quantity(self.block_number())),
            "eth_gasPrice" => Ok(quantity(1_000_000_000)),
            "eth_estimateGas" => Ok(quantity(250_000)),
            "eth_getTransactionCount" => Ok(quantity(self.sent_transactions())),
            "eth_getLogs" => self.get_logs(&params[0]),
            "eth_sendRawTransaction" => self.send_raw(params[0].as_str().unwrap_or_default()),
            "eth_getTransactionReceipt" => {
                let hash: Hash = serde_json::from_value(params[0].clone())
                    .map_err(|e| (-32602, e.to_string()))?;
                Ok(self
                    .state
                    .lock()
                    .receipts
                    .get(&hash)
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            "eth_call" => self.call(&params[0]),
            other => Err((-32601, format!("method {} not found", other))),
        }
    }

    fn get_logs(&self, filter: &Value) -> Result<Value, (i64, String)> {
        let address: Address = serde_json::from_value(filter["address"].clone())
            .map_err(|e| (-32602, e.to_string()))?;
        let topic0: Option<Hash> = serde_json::from_value(filter["topics"][0].clone()).ok();
        let from = filter["fromBlock"]
            .as_str()
            .and_then(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16).ok())
            .unwrap_or(0);

        let mut state = self.state.lock();
        state.get_logs_calls += 1;
        let logs: Vec<&LogEntry> = state
            .logs
            .iter()
            .filter(|log| log.address == address)
            .filter(|log| log.block_number.unwrap_or(0) >= from)
            .filter(|log| topic0.map_or(true, |t| log.signature() == Some(&t)))
            .collect();
        serde_json::to_value(logs).map_err(|e| (-32603, e.to_string()))
    }

    fn send_raw(&self, raw_hex: &str) -> Result<Value, (i64, String)> {
        let raw = hex::decode(raw_hex.trim_start_matches("0x"))
            .map_err(|e| (-32602, e.to_string()))?;
        let tx = Hash::from_slice(&Keccak256::digest(&raw));
        let data: Vec<u8> = Rlp::new(&raw)
            .val_at(5)
            .map_err(|e| (-32602, format!("{:?}", e)))?;

        let (owner, fingerprint) =
            decode_mint_call(&data).ok_or((-32000, "unsupported call".to_string()))?;

        let mut state = self.state.lock();
        state.sent += 1;
        let mined = self.mine_mint(&mut state, owner, fingerprint, tx);
        let (status, logs) = match mined {
            Some((_, logs)) => ("0x1", logs),
            None => ("0x0", Vec::new()),
        };
        let receipt = json!({
            "transactionHash": tx,
            "blockNumber": quantity(state.block),
            "status": status,
            "logs": logs,
        });
        state.receipts.insert(tx, receipt);
        Ok(json!(tx))
    }

    fn call(&self, request: &Value) -> Result<Value, (i64, String)> {
        let data = request["data"]
            .as_str()
            .and_then(|s| hex::decode(s.trim_start_matches("0x")).ok())
            .unwrap_or_default();
        if data.len() != 36 || data[..4] != abi::selector(abi::TOKEN_ID_TO_IDEA_HASH) {
            return Err((3, "execution reverted".to_string()));
        }

        let token_id = U256::from_be_slice(&data[4..]).as_u64() as usize;
        let words = token_id
            .checked_sub(1)
            .and_then(|i| self.state.lock().tokens.get(i).copied())
            .map(|fp| *fp.words())
            .unwrap_or([U256::ZERO, U256::ZERO]);

        let mut out = words[0].to_be_bytes().to_vec();
        out.extend_from_slice(&words[1].to_be_bytes());
        Ok(json!(format!("0x{}", hex::encode(out))))
    }
}

/// `mintWithProof(owner, a, b, c, input)`: owner word, then ten proof words
/// with the public input last.
fn decode_mint_call(data: &[u8]) -> Option<(Address, Fingerprint)> {
    const WORD: usize = 32;
    if data.len() != 4 + 11 * WORD || data[..4] != abi::selector(abi::MINT_WITH_PROOF) {
        return None;
    }
    let word = |i: usize| &data[4 + i * WORD..4 + (i + 1) * WORD];
    let owner = Address::from_slice(&word(0)[12..]);
    let fingerprint = Fingerprint::new(U256::from_be_slice(word(9)), U256::from_be_slice(word(10)));
    Some((owner, fingerprint))
}

fn address_topic(address: Address) -> Hash {
    let mut topic = [0u8; 32];
    topic[12..].copy_from_slice(address.as_bytes());
    Hash::from_slice(&topic)
}

fn quantity(n: u64) -> Value {
    json!(format!("0x{:x}", n))
}

async fn handle(State(chain): State<Arc<FakeChain>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    match chain.respond(&method, &request["params"]) {
        Ok(result) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
        Err((code, message)) => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        })),
    }
}
