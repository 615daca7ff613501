//! Error types for the Meridian SDK.
//!
//! One enum, one variant per failure kind the public API can produce.
//! Format and parsing errors fail fast at the call that detects them;
//! chain-state errors (insufficient balance, bad nonce) are surfaced from
//! node responses, never computed locally.

use thiserror::Error;

/// Every fallible SDK operation returns this.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport-level failure: connection refused, DNS, TLS, broken pipe.
    /// Distinct from [`SdkError::Timeout`] so callers can tell "node down"
    /// from "node slow".
    #[error("network error: {0}")]
    Network(String),

    /// The configured RPC timeout elapsed before the node answered.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The configured per-request timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The node returned a JSON-RPC error envelope.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC 2.0 error code.
        code: i32,
        /// Human-readable message from the node.
        message: String,
    },

    /// An address string failed to parse: bad hex, wrong length.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A signature failed verification or had the wrong shape.
    #[error("invalid signature")]
    InvalidSignature,

    /// The transaction violates a local structural rule (oversized payload,
    /// malformed amount string, unknown wire kind).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// The recovery phrase failed BIP-39 checksum validation.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The node rejected the transaction for insufficient funds.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The node rejected the transaction's nonce (stale or from the future).
    #[error("invalid nonce")]
    InvalidNonce,

    /// The queried account does not exist on chain.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// A signing operation failed.
    #[error("signing error: {0}")]
    SigningError(String),

    /// Key material could not be constructed (wrong length, bad entropy).
    #[error("key generation error: {0}")]
    KeyGeneration(String),

    /// A network-dependent operation was invoked before `connect`.
    #[error("not connected: call connect() with an RPC endpoint first")]
    NotConnected,

    /// A submitted transaction was not confirmed within the wait budget.
    /// The transaction may still confirm later; the hash remains valid.
    #[error("transaction {hash} not confirmed within {timeout_ms}ms")]
    ConfirmationTimeout {
        /// Hash of the transaction being waited on.
        hash: String,
        /// The overall wait budget in milliseconds.
        timeout_ms: u64,
    },
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SdkError::Timeout {
                timeout_ms: crate::config::DEFAULT_RPC_TIMEOUT.as_millis() as u64,
            };
        }
        SdkError::Network(err.to_string())
    }
}
