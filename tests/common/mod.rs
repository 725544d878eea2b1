//! Shared utilities for integration testing.
//!
//! `start_mock_node` runs a minimal JSON-RPC node that serves the
//! `PlayerStateContract` read calls from in-memory state, accepts signed
//! transactions and answers receipt lookups as configured.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::dyn_abi::DynSolValue;
use alloy::hex;
use alloy::primitives::{keccak256, Address, TxHash, U256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use player_state::config::{ChainConfig, ReaderConfig, SignerConfig, WriterConfig};

/// Anvil's first account.
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// An address nothing listens on.
#[allow(dead_code)]
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// How the mock answers `eth_call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum CallBehavior {
    /// Encode results from state.
    Serve,
    /// JSON-RPC error code 3, as a node reports a revert.
    Revert,
    /// Empty return data, as for an address with no code.
    Empty,
}

/// How the mock answers `eth_getTransactionReceipt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ReceiptBehavior {
    /// `null`: not mined yet.
    Pending,
    /// Mined in `block`; `success: false` reports status `0x0`.
    Mined { block: u64, success: bool },
    /// JSON-RPC error code -32000.
    Fail,
}

pub struct MockState {
    pub chain_id: u64,
    pub owner: Address,
    pub players: Mutex<Vec<(String, Address, U256)>>,
    pub behavior: CallBehavior,
    pub receipt: ReceiptBehavior,
    block_number: AtomicU64,
    advance_blocks: bool,
    sent: Mutex<Vec<TxHash>>,
    requests: Mutex<Vec<String>>,
}

impl MockState {
    pub fn new(owner: Address) -> Self {
        Self {
            chain_id: 31337,
            owner,
            players: Mutex::new(Vec::new()),
            behavior: CallBehavior::Serve,
            receipt: ReceiptBehavior::Pending,
            block_number: AtomicU64::new(42),
            advance_blocks: false,
            sent: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn with_behavior(mut self, behavior: CallBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[allow(dead_code)]
    pub fn with_receipt(mut self, receipt: ReceiptBehavior) -> Self {
        self.receipt = receipt;
        self
    }

    /// Start the chain head at `block`.
    #[allow(dead_code)]
    pub fn at_block(self, block: u64) -> Self {
        self.block_number.store(block, Ordering::SeqCst);
        self
    }

    /// Mine one block after every `eth_blockNumber` answer.
    #[allow(dead_code)]
    pub fn with_advancing_blocks(mut self) -> Self {
        self.advance_blocks = true;
        self
    }

    /// Hashes of the raw transactions accepted so far.
    #[allow(dead_code)]
    pub fn sent_transactions(&self) -> Vec<TxHash> {
        self.sent.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn add_player(&self, uri: &str, address: Address, score: u64) {
        self.players
            .lock()
            .unwrap()
            .push((uri.to_string(), address, U256::from(score)));
    }

    /// RPC methods received so far, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn eth_call(&self, params: &Value) -> Result<Value, (i64, String)> {
        let call = &params[0];
        let input = call["input"]
            .as_str()
            .or_else(|| call["data"].as_str())
            .ok_or((-32602, "missing call data".to_string()))?;
        let data = hex::decode(input).map_err(|e| (-32602, e.to_string()))?;
        if data.len() < 4 {
            return Err((-32602, "short call data".to_string()));
        }

        match self.behavior {
            CallBehavior::Revert => return Err((3, "execution reverted".to_string())),
            CallBehavior::Empty => return Ok(json!("0x")),
            CallBehavior::Serve => {}
        }

        let selector = &data[..4];
        let encoded = if selector == &selector_of("getAllPlayers()")[..] {
            let players = self
                .players
                .lock()
                .unwrap()
                .iter()
                .map(|(uri, address, score)| {
                    DynSolValue::Tuple(vec![
                        DynSolValue::String(uri.clone()),
                        DynSolValue::Address(*address),
                        DynSolValue::Uint(*score, 256),
                    ])
                })
                .collect();
            DynSolValue::Tuple(vec![DynSolValue::Array(players)]).abi_encode_params()
        } else if selector == &selector_of("owner()")[..] {
            DynSolValue::Tuple(vec![DynSolValue::Address(self.owner)]).abi_encode_params()
        } else {
            return Err((3, "execution reverted: unknown selector".to_string()));
        };
        Ok(json!(format!("0x{}", hex::encode(encoded))))
    }
}

impl MockState {
    fn block_number(&self) -> u64 {
        if self.advance_blocks {
            self.block_number.fetch_add(1, Ordering::SeqCst)
        } else {
            self.block_number.load(Ordering::SeqCst)
        }
    }

    fn send_raw_transaction(&self, params: &Value) -> Result<Value, (i64, String)> {
        let raw = params[0]
            .as_str()
            .ok_or((-32602, "missing raw transaction".to_string()))?;
        let bytes = hex::decode(raw).map_err(|e| (-32602, e.to_string()))?;
        let hash = keccak256(&bytes);
        self.sent.lock().unwrap().push(hash);
        Ok(json!(hash.to_string()))
    }

    fn transaction_receipt(&self, params: &Value) -> Result<Value, (i64, String)> {
        let (block, success) = match self.receipt {
            ReceiptBehavior::Pending => return Ok(Value::Null),
            ReceiptBehavior::Fail => return Err((-32000, "receipt lookup failed".to_string())),
            ReceiptBehavior::Mined { block, success } => (block, success),
        };
        let status = if success { "0x1" } else { "0x0" };
        Ok(json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": params[0].clone(),
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": format!("0x{:x}", block),
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "to": CONTRACT_ADDRESS,
            "contractAddress": null
        }))
    }
}

fn fee_history() -> Value {
    json!({
        "oldestBlock": "0x20",
        "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
        "gasUsedRatio": [0.5],
        "reward": [["0x3b9aca00"]]
    })
}

fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

async fn handle(State(state): State<Arc<MockState>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default().to_string();
    state.requests.lock().unwrap().push(method.clone());

    let result = match method.as_str() {
        "eth_chainId" => Ok(json!(format!("0x{:x}", state.chain_id))),
        "eth_blockNumber" => Ok(json!(format!("0x{:x}", state.block_number()))),
        "eth_getTransactionReceipt" => state.transaction_receipt(&req["params"]),
        "eth_sendRawTransaction" => state.send_raw_transaction(&req["params"]),
        "eth_feeHistory" => Ok(fee_history()),
        "eth_getTransactionCount" => Ok(json!("0x0")),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Ok(json!("0x3b9aca00")),
        "eth_estimateGas" => Ok(json!("0x186a0")),
        "eth_call" => state.eth_call(&req["params"]),
        _ => Err((-32601, format!("method {} not found", method))),
    };

    Json(match result {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    })
}

/// A running mock node.
pub struct MockNode {
    pub url: Url,
    pub state: Arc<MockState>,
}

/// Start a mock JSON-RPC node on an ephemeral local port.
pub async fn start_mock_node(state: MockState) -> MockNode {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/", post(handle))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode {
        url: format!("http://{}", addr).parse().unwrap(),
        state,
    }
}

pub fn chain_config(url: Url) -> ChainConfig {
    let mut config = ChainConfig::new(url, CONTRACT_ADDRESS.parse().unwrap());
    config.rpc_timeout = Duration::from_secs(5);
    config
}

#[allow(dead_code)]
pub fn reader_config(url: Url) -> ReaderConfig {
    ReaderConfig {
        chain: chain_config(url),
    }
}

#[allow(dead_code)]
pub fn writer_config(url: Url) -> WriterConfig {
    WriterConfig {
        chain: chain_config(url),
        signer: SignerConfig::new(TEST_PRIVATE_KEY, None),
        confirmation_blocks: 0,
        confirmation_timeout: Duration::from_secs(5),
    }
}

/// Write `content` to a uniquely named file in the temp directory.
#[allow(dead_code)]
pub fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}
