//! Confirmation tracking for submitted transactions.
//!
//! Submission returns a [`PendingTransaction`] immediately; confirmation is
//! a separate, caller-paced concern. The default strategy is a fixed
//! 1-second poll against `/get_transaction` — no backoff, no push
//! subscription. The strategy seam ([`ConfirmationStrategy`]) exists so a
//! streaming implementation can slot in later behind the same `wait`
//! contract.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::{
    CONFIRMATION_POLL_INTERVAL, DEFAULT_CONFIRMATION_TIMEOUT, MAX_POLL_TRANSPORT_FAILURES,
};
use crate::error::SdkError;
use crate::rpc::{RpcClient, TxReceipt};

/// Handle to a transaction that has been accepted by a node but not yet
/// observed in a block.
///
/// Dropping the handle abandons tracking only; the transaction itself is
/// already in flight and may still confirm.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    hash: String,
    client: RpcClient,
}

impl PendingTransaction {
    pub(crate) fn new(hash: String, client: RpcClient) -> Self {
        Self { hash, client }
    }

    /// The transaction hash, 64 hex characters.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Wait for inclusion with the default strategy and the default
    /// 60-second budget.
    pub async fn wait_default(&self) -> Result<TxReceipt, SdkError> {
        self.wait(DEFAULT_CONFIRMATION_TIMEOUT).await
    }

    /// Wait for inclusion with the default polling strategy.
    ///
    /// Returns the receipt once the node reports the transaction in a block
    /// (whether it executed successfully or failed on chain — inspect
    /// [`TxReceipt::status`]). Fails with [`SdkError::ConfirmationTimeout`]
    /// when `timeout` elapses first.
    pub async fn wait(&self, timeout: Duration) -> Result<TxReceipt, SdkError> {
        self.wait_with(&PollingConfirmation::default(), timeout).await
    }

    /// Wait with a caller-supplied confirmation strategy.
    pub async fn wait_with(
        &self,
        strategy: &dyn ConfirmationStrategy,
        timeout: Duration,
    ) -> Result<TxReceipt, SdkError> {
        strategy.confirm(&self.client, &self.hash, timeout).await
    }
}

/// How a pending transaction gets tracked to inclusion.
#[async_trait]
pub trait ConfirmationStrategy: Send + Sync {
    /// Resolve `hash` to a receipt within `timeout`, or fail.
    async fn confirm(
        &self,
        client: &RpcClient,
        hash: &str,
        timeout: Duration,
    ) -> Result<TxReceipt, SdkError>;
}

/// Fixed-interval polling against `/get_transaction`.
///
/// Transient transport failures during the poll are tolerated up to
/// `max_transport_failures` consecutive occurrences, then surfaced — a node
/// that has gone away entirely should look different from a transaction
/// that merely hasn't confirmed yet.
#[derive(Debug, Clone)]
pub struct PollingConfirmation {
    /// Delay between polls.
    pub interval: Duration,
    /// Consecutive transport failures tolerated before surfacing.
    pub max_transport_failures: u32,
}

impl Default for PollingConfirmation {
    fn default() -> Self {
        Self {
            interval: CONFIRMATION_POLL_INTERVAL,
            max_transport_failures: MAX_POLL_TRANSPORT_FAILURES,
        }
    }
}

#[async_trait]
impl ConfirmationStrategy for PollingConfirmation {
    async fn confirm(
        &self,
        client: &RpcClient,
        hash: &str,
        timeout: Duration,
    ) -> Result<TxReceipt, SdkError> {
        let deadline = Instant::now() + timeout;
        let mut consecutive_failures = 0u32;

        loop {
            match client.get_transaction(hash).await {
                Ok(Some(receipt)) if receipt.block_height.is_some() => {
                    info!(hash, status = %receipt.status, "transaction included");
                    return Ok(receipt);
                }
                Ok(receipt) => {
                    // Known-but-pending and not-yet-known both just mean
                    // "keep polling".
                    debug!(hash, known = receipt.is_some(), "not yet confirmed");
                    consecutive_failures = 0;
                }
                Err(err @ (SdkError::Network(_) | SdkError::Timeout { .. })) => {
                    consecutive_failures += 1;
                    warn!(
                        hash,
                        consecutive_failures,
                        error = %err,
                        "transport failure during confirmation poll"
                    );
                    if consecutive_failures >= self.max_transport_failures {
                        return Err(err);
                    }
                }
                // Anything else (node-side error envelope) is not transient.
                Err(err) => return Err(err),
            }

            if Instant::now() + self.interval > deadline {
                return Err(SdkError::ConfirmationTimeout {
                    hash: hash.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            sleep(self.interval).await;
        }
    }
}
