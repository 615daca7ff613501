//! # RPC Client
//!
//! HTTP client for the Meridian node API. Read queries hit the REST-style
//! endpoints; transaction submission goes through the JSON-RPC 2.0
//! `tx_submit` envelope posted to the endpoint root.
//!
//! The client is cheap to clone (the underlying connection pool is shared)
//! and enforces one timeout for every request. No retries happen here —
//! callers that want retry semantics build them on top, like the wallet's
//! confirmation poll does.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::types::{
    AccountInfo, BlockInfo, HealthStatus, MempoolInfo, NetworkStatus, ProposalInfo, RpcError,
    RpcRequest, RpcResponse, SubmitResult, TxReceipt, ValidatorInfo,
};
use crate::config::DEFAULT_RPC_TIMEOUT;
use crate::error::SdkError;
use crate::transaction::{Address, Transaction};

/// Client for one Meridian node endpoint.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    // JSON-RPC request ids; shared across clones so ids stay unique per pool.
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Connect to `base_url` (e.g. `http://localhost:26657`) with the
    /// default 30-second request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SdkError> {
        Self::with_timeout(base_url, DEFAULT_RPC_TIMEOUT)
    }

    /// Connect with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Network(format!("http client setup: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // -----------------------------------------------------------------------
    // Read queries (REST)
    // -----------------------------------------------------------------------

    /// Fetch balance, stake, and nonce for an address.
    ///
    /// An address the chain has never seen comes back as
    /// [`SdkError::AccountNotFound`], not as a zeroed account.
    pub async fn get_account(&self, address: &Address) -> Result<AccountInfo, SdkError> {
        debug!(address = %address, "rpc get_account");
        self.post("/get_account", &json!({ "address": address.to_hex() }))
            .await
    }

    /// Fetch a block by height.
    pub async fn get_block(&self, height: u64) -> Result<BlockInfo, SdkError> {
        debug!(height, "rpc get_block");
        self.post("/get_block", &json!({ "height": height })).await
    }

    /// Look up a transaction by hash. `Ok(None)` means the node does not
    /// know the hash (yet) — distinct from transport failure.
    pub async fn get_transaction(&self, hash: &str) -> Result<Option<TxReceipt>, SdkError> {
        debug!(hash, "rpc get_transaction");
        let url = format!("{}/get_transaction", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "hash": hash }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode_rest(response).await.map(Some)
    }

    /// Current chain id, height, and sync state.
    pub async fn network_status(&self) -> Result<NetworkStatus, SdkError> {
        debug!("rpc network_status");
        self.get("/network_status").await
    }

    /// The validator set.
    pub async fn validators(&self) -> Result<Vec<ValidatorInfo>, SdkError> {
        debug!("rpc validators");
        self.get("/validators").await
    }

    /// Open and past governance proposals.
    pub async fn proposals(&self) -> Result<Vec<ProposalInfo>, SdkError> {
        debug!("rpc proposals");
        self.get("/proposals").await
    }

    /// Mempool occupancy.
    pub async fn mempool(&self) -> Result<MempoolInfo, SdkError> {
        debug!("rpc mempool");
        self.get("/mempool").await
    }

    /// Node liveness and version.
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        debug!("rpc health");
        self.get("/health").await
    }

    // -----------------------------------------------------------------------
    // Submission (JSON-RPC)
    // -----------------------------------------------------------------------

    /// Submit a signed transaction via `tx_submit`, returning its hash.
    ///
    /// The transaction must already carry a signature; the hash returned by
    /// the node is checked against the locally computed one so a
    /// misbehaving node can't hand back a handle to a different
    /// transaction.
    pub async fn submit_transaction(&self, tx: &Transaction) -> Result<String, SdkError> {
        if !tx.is_signed() {
            return Err(SdkError::InvalidTransaction(
                "refusing to submit an unsigned transaction".to_string(),
            ));
        }

        let local_hash = tx.hash();
        let wire = tx.to_wire();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::tx_submit(id, &wire)?;

        info!(hash = %local_hash, kind = %tx.kind, "submitting transaction");
        let response = self
            .http
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let envelope: RpcResponse = Self::decode_rest(response).await?;
        let result: SubmitResult = envelope.into_result()?;

        if result.hash != local_hash {
            return Err(SdkError::Rpc {
                code: -32603,
                message: format!(
                    "node acknowledged hash {} but local encoding hashes to {}",
                    result.hash, local_hash
                ),
            });
        }
        Ok(result.hash)
    }

    // -----------------------------------------------------------------------
    // Transport plumbing
    // -----------------------------------------------------------------------

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SdkError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode_rest(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode_rest(response).await
    }

    /// Decode a REST response body, turning non-2xx statuses into typed
    /// errors. Error bodies carry the same `{code, message}` shape as the
    /// JSON-RPC error object, so a node-side "account not found" maps to
    /// the dedicated variant from either surface.
    async fn decode_rest<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SdkError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_slice::<RpcError>(&body) {
                return Err(err.into_sdk_error());
            }
            return Err(SdkError::Rpc {
                code: status.as_u16() as i32,
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| SdkError::Rpc {
            code: -32603,
            message: format!("malformed response body: {e}"),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> SdkError {
        if err.is_timeout() {
            return SdkError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            };
        }
        SdkError::Network(err.to_string())
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = RpcClient::new("http://localhost:26657/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:26657");

        let client = RpcClient::new("http://localhost:26657").unwrap();
        assert_eq!(client.base_url(), "http://localhost:26657");
    }

    #[test]
    fn default_timeout_applies() {
        let client = RpcClient::new("http://localhost:26657").unwrap();
        assert_eq!(client.timeout(), DEFAULT_RPC_TIMEOUT);

        let client =
            RpcClient::with_timeout("http://localhost:26657", Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn clones_share_request_id_sequence() {
        let a = RpcClient::new("http://localhost:26657").unwrap();
        let b = a.clone();
        assert_eq!(a.next_id.fetch_add(1, Ordering::Relaxed), 1);
        assert_eq!(b.next_id.fetch_add(1, Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn unsigned_transaction_rejected_before_any_io() {
        use crate::crypto::keys::KeyPair;
        use crate::transaction::TransactionBuilder;

        // Port 9 is the discard protocol; nothing listens there. The call
        // must fail on the local signature check, not on transport.
        let client = RpcClient::new("http://127.0.0.1:9").unwrap();
        let builder = TransactionBuilder::new(KeyPair::from_seed(&[1u8; 32]), "meridian-1");
        let unsigned = builder.stake(10).build().unwrap();

        let err = client.submit_transaction(&unsigned).await.unwrap_err();
        assert!(matches!(err, SdkError::InvalidTransaction(_)));
    }

    #[test]
    fn debug_omits_nothing_secret() {
        // The client holds no key material; Debug shows endpoint + timeout.
        let client = RpcClient::new("http://localhost:26657").unwrap();
        let s = format!("{client:?}");
        assert!(s.contains("localhost"));
    }
}
