//! # RPC Wire Types
//!
//! Request/response shapes for the Meridian node API. The node exposes two
//! surfaces and this module covers both:
//!
//! - REST-style endpoints for reads (`/get_account`, `/get_block`,
//!   `/get_transaction`, `/network_status`, `/validators`, `/proposals`,
//!   `/mempool`, `/health`) returning plain JSON payloads.
//! - A JSON-RPC 2.0 envelope used specifically for transaction submission
//!   (`tx_submit`).
//!
//! Balances, nonces, and heights are plain `u64` here — these types never
//! cross into consensus-critical signing material, so the decimal-string
//! discipline of the transaction wire form does not apply.

use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::transaction::WireTransaction;

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// Method name for transaction submission. The only JSON-RPC method the
/// node exposes; everything else is REST.
pub const METHOD_TX_SUBMIT: &str = "tx_submit";

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version. Always "2.0".
    pub jsonrpc: String,
    /// Request identifier. Echoed back in the response.
    pub id: u64,
    /// The method to invoke.
    pub method: String,
    /// Method-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RpcRequest {
    /// Build a `tx_submit` request carrying a wire-form transaction.
    pub fn tx_submit(id: u64, tx: &WireTransaction) -> Result<Self, SdkError> {
        let params = serde_json::to_value(tx)
            .map_err(|e| SdkError::InvalidTransaction(format!("wire encoding: {e}")))?;
        Ok(Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: METHOD_TX_SUBMIT.to_string(),
            params,
        })
    }
}

/// A JSON-RPC 2.0 response.
///
/// Exactly one of `result` or `error` is set by a conforming node; both
/// absent is a protocol violation we surface as an RPC error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// JSON-RPC version. Always "2.0".
    pub jsonrpc: String,
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The successful result, if the method completed without error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// The error, if the method failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Unwrap the envelope into a typed result or the mapped error.
    pub fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, SdkError> {
        if let Some(err) = self.error {
            return Err(err.into_sdk_error());
        }
        let value = self.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "response carried neither result nor error".to_string(),
        })?;
        serde_json::from_value(value).map_err(|e| SdkError::Rpc {
            code: -32603,
            message: format!("malformed result payload: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// RPC Errors
// ---------------------------------------------------------------------------

/// Application-specific error codes the node returns alongside the
/// JSON-RPC 2.0 standard range (`-32700..=-32600`).
pub const CODE_ACCOUNT_NOT_FOUND: i32 = -32002;
pub const CODE_INSUFFICIENT_BALANCE: i32 = -32010;
pub const CODE_INVALID_NONCE: i32 = -32011;

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// Map a node error onto the SDK's error vocabulary. Known application
    /// codes get dedicated variants; everything else stays a generic RPC
    /// error with its code intact.
    pub fn into_sdk_error(self) -> SdkError {
        match self.code {
            CODE_INSUFFICIENT_BALANCE => SdkError::InsufficientBalance,
            CODE_INVALID_NONCE => SdkError::InvalidNonce,
            CODE_ACCOUNT_NOT_FOUND => SdkError::AccountNotFound(self.message),
            code => SdkError::Rpc {
                code,
                message: self.message,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// REST Response Payloads
// ---------------------------------------------------------------------------

/// Response payload for `POST /get_account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// The address queried, 64 hex characters.
    pub address: String,
    /// Spendable balance in the smallest denomination.
    pub balance: u64,
    /// Currently bonded stake.
    pub staked: u64,
    /// The account's last used nonce. The next transaction uses `nonce + 1`.
    pub nonce: u64,
}

/// Response payload for `POST /get_block`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height.
    pub height: u64,
    /// Block hash, 64 hex characters.
    pub hash: String,
    /// Parent block hash.
    pub parent_hash: String,
    /// Merkle root over the block's transaction hashes.
    pub tx_root: String,
    /// Proposer address.
    pub proposer: String,
    /// Block timestamp, Unix seconds.
    pub timestamp: u64,
    /// Hashes of the transactions included in this block.
    pub transactions: Vec<String>,
}

/// Response payload for `GET /network_status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStatus {
    /// Chain identifier transactions must carry to be accepted.
    pub chain_id: String,
    /// Current chain height.
    pub block_height: u64,
    /// Hash of the latest block.
    pub latest_block_hash: String,
    /// Number of peers the node is connected to.
    pub peer_count: u64,
    /// Whether the node is still catching up.
    pub syncing: bool,
}

/// One entry in the `GET /validators` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// Validator address, 64 hex characters.
    pub address: String,
    /// Bonded stake backing this validator.
    pub stake: u64,
    /// Whether the validator is in the active set.
    pub active: bool,
}

/// One entry in the `GET /proposals` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalInfo {
    /// Proposal identifier, referenced by vote transactions.
    pub id: u64,
    /// Short human-readable title.
    pub title: String,
    /// Full proposal text.
    pub description: String,
    /// Address that submitted the proposal.
    pub proposer: String,
    /// Lifecycle status, e.g. "voting", "passed", "rejected".
    pub status: String,
    /// Tally so far.
    pub yes_votes: u64,
    pub no_votes: u64,
    pub abstain_votes: u64,
    /// Unix timestamp when voting closes.
    pub voting_ends_at: u64,
}

/// Response payload for `GET /mempool`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolInfo {
    /// Number of transactions waiting for inclusion.
    pub pending: u64,
    /// Total size of pending transactions in bytes.
    pub bytes: u64,
}

/// Response payload for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `true` if the node considers itself able to serve requests.
    pub healthy: bool,
    /// Node software version string.
    pub version: String,
    /// Seconds since the node process started.
    pub uptime_secs: u64,
}

/// Response payload for `POST /get_transaction`.
///
/// `None`-valued block fields mean the transaction is known to the node but
/// not yet included in a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash, 64 hex characters.
    pub hash: String,
    /// Height of the including block, once confirmed.
    pub block_height: Option<u64>,
    /// Hash of the including block, once confirmed.
    pub block_hash: Option<String>,
    /// Lifecycle status: "pending", "confirmed", or "failed".
    pub status: String,
    /// Unix timestamp when the node first saw the transaction.
    pub timestamp: u64,
}

impl TxReceipt {
    /// `true` once the transaction is included in a block.
    pub fn is_confirmed(&self) -> bool {
        self.status == "confirmed"
    }
}

/// JSON-RPC result payload for `tx_submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResult {
    /// The hash under which the node accepted the transaction. Always
    /// matches the locally computed hash; the client checks.
    pub hash: String,
}
