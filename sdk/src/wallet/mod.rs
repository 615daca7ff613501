//! # Wallet Module
//!
//! The high-level facade: one signing key, one chain, one optional node
//! connection. A wallet starts **disconnected** — everything that needs the
//! network fails with [`SdkError::NotConnected`] until [`Wallet::connect`]
//! binds an endpoint. Connecting again just rebinds; there is no disconnect.
//!
//! ```text
//! mod.rs     — Wallet facade, TxOptions
//! pending.rs — PendingTransaction handle + confirmation strategies
//! ```
//!
//! ## Nonce handling
//!
//! Every mutating operation queries the account's current on-chain nonce
//! and submits with `nonce + 1`, unless [`TxOptions::nonce`] supplies one
//! for offline-style signing. This read-then-increment is NOT safe for
//! concurrent submission from the same key: two tasks racing through it can
//! pick the same nonce and one submission will bounce with
//! [`SdkError::InvalidNonce`]. Serialize submissions per key, or hand out
//! explicit nonces from a single dispenser.

pub mod pending;

pub use pending::{ConfirmationStrategy, PendingTransaction, PollingConfirmation};

use std::time::Duration;

use tracing::{debug, info};

use crate::crypto::keys::{KeyPair, PublicKey};
use crate::crypto::mnemonic;
use crate::error::SdkError;
use crate::rpc::{AccountInfo, RpcClient};
use crate::transaction::{
    Address, ProposalPayload, Transaction, TransactionBuilder, TxDraft, VoteOption,
};

// ---------------------------------------------------------------------------
// TxOptions
// ---------------------------------------------------------------------------

/// Per-operation overrides. `Default` means: nonce from the chain,
/// timestamp now, the wallet's chain id.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Explicit nonce; skips the on-chain nonce query entirely.
    pub nonce: Option<u64>,
    /// Explicit Unix-seconds timestamp.
    pub timestamp: Option<u64>,
    /// Chain id for this operation only.
    pub chain_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// One account's view of the Meridian network.
pub struct Wallet {
    builder: TransactionBuilder,
    client: Option<RpcClient>,
}

impl Wallet {
    /// Wrap an existing keypair. The wallet starts disconnected.
    pub fn new(keypair: KeyPair, chain_id: impl Into<String>) -> Self {
        Self {
            builder: TransactionBuilder::new(keypair, chain_id),
            client: None,
        }
    }

    /// Derive the wallet key from a recovery phrase (see
    /// [`crate::crypto::mnemonic`] for the derivation scheme).
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: &str,
        account_index: u32,
        chain_id: impl Into<String>,
    ) -> Result<Self, SdkError> {
        let keypair = mnemonic::to_keypair(phrase, passphrase, account_index)?;
        Ok(Self::new(keypair, chain_id))
    }

    /// This wallet's address.
    pub fn address(&self) -> Address {
        self.builder.address()
    }

    /// This wallet's public key.
    pub fn public_key(&self) -> PublicKey {
        self.address().to_public_key()
    }

    /// The chain id new transactions carry by default.
    pub fn chain_id(&self) -> &str {
        self.builder.chain_id()
    }

    /// The underlying builder, for constructing transactions without
    /// submitting them (offline signing flows).
    pub fn builder(&self) -> &TransactionBuilder {
        &self.builder
    }

    // -----------------------------------------------------------------------
    // Connection state
    // -----------------------------------------------------------------------

    /// Bind an RPC endpoint. Idempotent: calling again rebinds.
    pub fn connect(&mut self, url: impl Into<String>) -> Result<(), SdkError> {
        let client = RpcClient::new(url)?;
        info!(endpoint = client.base_url(), "wallet connected");
        self.client = Some(client);
        Ok(())
    }

    /// Bind an RPC endpoint with an explicit request timeout.
    pub fn connect_with_timeout(
        &mut self,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<(), SdkError> {
        let client = RpcClient::with_timeout(url, timeout)?;
        info!(endpoint = client.base_url(), "wallet connected");
        self.client = Some(client);
        Ok(())
    }

    /// `true` once an endpoint is bound.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&RpcClient, SdkError> {
        self.client.as_ref().ok_or(SdkError::NotConnected)
    }

    // -----------------------------------------------------------------------
    // Read queries
    // -----------------------------------------------------------------------

    /// Balance, stake, and nonce for this wallet's account.
    pub async fn account(&self) -> Result<AccountInfo, SdkError> {
        self.client()?.get_account(&self.address()).await
    }

    /// Spendable balance.
    pub async fn balance(&self) -> Result<u64, SdkError> {
        Ok(self.account().await?.balance)
    }

    /// The nonce the next transaction should carry.
    pub async fn next_nonce(&self) -> Result<u64, SdkError> {
        Ok(self.account().await?.nonce + 1)
    }

    // -----------------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------------

    /// Send `amount` to `to` (64-hex address), with an optional memo.
    pub async fn transfer(
        &self,
        to: &str,
        amount: u64,
        memo: Option<Vec<u8>>,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        let mut draft = self.builder.transfer(to, amount)?;
        if let Some(memo) = memo {
            draft = draft.memo(memo);
        }
        self.submit(draft, opts).await
    }

    /// Bond `amount` to this account's stake.
    pub async fn stake(
        &self,
        amount: u64,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        self.submit(self.builder.stake(amount), opts).await
    }

    /// Release `amount` of bonded stake.
    pub async fn unstake(
        &self,
        amount: u64,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        self.submit(self.builder.unstake(amount), opts).await
    }

    /// Submit a governance proposal with `deposit` at stake.
    pub async fn submit_proposal(
        &self,
        proposal: &ProposalPayload,
        deposit: u64,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        self.submit(self.builder.submit_proposal(proposal, deposit)?, opts)
            .await
    }

    /// Cast a vote on a proposal.
    pub async fn vote(
        &self,
        proposal_id: u64,
        option: VoteOption,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        self.submit(self.builder.vote(proposal_id, option)?, opts)
            .await
    }

    /// Submit an already signed transaction, for offline signing flows
    /// where the record was built and signed elsewhere.
    pub async fn submit_signed(
        &self,
        tx: &Transaction,
    ) -> Result<PendingTransaction, SdkError> {
        let client = self.client()?;
        let hash = client.submit_transaction(tx).await?;
        Ok(PendingTransaction::new(hash, client.clone()))
    }

    async fn submit(
        &self,
        draft: TxDraft<'_>,
        opts: TxOptions,
    ) -> Result<PendingTransaction, SdkError> {
        let client = self.client()?;

        let nonce = match opts.nonce {
            Some(n) => n,
            None => self.next_nonce().await?,
        };
        debug!(nonce, "assigned nonce");

        let mut draft = draft.nonce(nonce);
        if let Some(ts) = opts.timestamp {
            draft = draft.timestamp(ts);
        }
        if let Some(chain_id) = opts.chain_id {
            draft = draft.chain_id(chain_id);
        }

        let signed = draft.build_signed()?;
        let hash = client.submit_transaction(&signed).await?;
        Ok(PendingTransaction::new(hash, client.clone()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id())
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet::new(KeyPair::from_seed(&[7u8; 32]), "meridian-1")
    }

    #[tokio::test]
    async fn disconnected_wallet_refuses_network_ops() {
        let w = wallet();
        assert!(!w.is_connected());

        assert!(matches!(w.account().await, Err(SdkError::NotConnected)));
        assert!(matches!(w.balance().await, Err(SdkError::NotConnected)));
        assert!(matches!(
            w.stake(100, TxOptions::default()).await,
            Err(SdkError::NotConnected)
        ));
        assert!(matches!(
            w.transfer(&"ab".repeat(32), 1, None, TxOptions::default())
                .await,
            Err(SdkError::NotConnected)
        ));
    }

    #[test]
    fn connect_is_idempotent_rebind() {
        let mut w = wallet();
        w.connect("http://localhost:26657").unwrap();
        assert!(w.is_connected());

        // A second connect rebinds rather than erroring.
        w.connect("http://localhost:26658").unwrap();
        assert!(w.is_connected());
        assert_eq!(
            w.client().unwrap().base_url(),
            "http://localhost:26658"
        );
    }

    #[test]
    fn address_matches_keypair() {
        let keypair = KeyPair::from_seed(&[7u8; 32]);
        let expected = Address::from_public_key(&keypair.public_key());
        assert_eq!(wallet().address(), expected);
    }

    #[test]
    fn from_mnemonic_is_deterministic() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let a = Wallet::from_mnemonic(phrase, "", 0, "meridian-1").unwrap();
        let b = Wallet::from_mnemonic(phrase, "", 0, "meridian-1").unwrap();
        assert_eq!(a.address(), b.address());

        let c = Wallet::from_mnemonic(phrase, "", 1, "meridian-1").unwrap();
        assert_ne!(a.address(), c.address());
    }

    #[test]
    fn from_mnemonic_rejects_garbage() {
        assert!(matches!(
            Wallet::from_mnemonic("not a phrase", "", 0, "meridian-1"),
            Err(SdkError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn default_options_mean_chain_derived_everything() {
        let opts = TxOptions::default();
        assert!(opts.nonce.is_none());
        assert!(opts.timestamp.is_none());
        assert!(opts.chain_id.is_none());
    }

    #[test]
    fn debug_shows_state_not_keys() {
        let w = wallet();
        let s = format!("{w:?}");
        assert!(s.contains("connected"));
        assert!(!s.to_lowercase().contains("secret"));
    }
}
