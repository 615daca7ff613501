//! Transaction construction and signing.
//!
//! [`TransactionBuilder`] turns business parameters (transfer, stake,
//! unstake, proposal, vote) into canonical [`Transaction`] records. Each
//! per-kind entry point returns a [`TxDraft`] for the optional knobs
//! (nonce, timestamp, chain-id override, memo); `build()` validates and
//! produces the unsigned record; `sign()` produces a signed copy.
//!
//! The builder holds no transaction state across calls — every record is
//! owned by the caller from the moment `build()` returns.

use chrono::Utc;

use super::codec::Transaction;
use super::types::{Address, ProposalPayload, TxKind, VoteOption, VotePayload};
use crate::config::MAX_PAYLOAD_SIZE;
use crate::crypto::keys::{KeyPair, Signature};
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Assembles canonical transaction records for one signing key.
///
/// # Usage
///
/// ```no_run
/// use meridian_sdk::crypto::keys::KeyPair;
/// use meridian_sdk::transaction::TransactionBuilder;
///
/// let keypair = KeyPair::generate();
/// let builder = TransactionBuilder::new(keypair, "meridian-1");
///
/// let tx = builder
///     .transfer("3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29", 1_000_000)?
///     .memo_str("coffee")
///     .nonce(4)
///     .build()?;
/// let signed = builder.sign(&tx)?;
/// # Ok::<(), meridian_sdk::SdkError>(())
/// ```
pub struct TransactionBuilder {
    keypair: KeyPair,
    chain_id: String,
}

impl TransactionBuilder {
    /// Create a builder bound to a signing key and a default chain id.
    pub fn new(keypair: KeyPair, chain_id: impl Into<String>) -> Self {
        Self {
            keypair,
            chain_id: chain_id.into(),
        }
    }

    /// The sender address every record from this builder will carry.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.keypair.public_key())
    }

    /// The default chain id.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Start a transfer to `to` (64-hex address, `0x` prefix accepted).
    ///
    /// Fails immediately with [`SdkError::InvalidAddress`] if the address
    /// does not parse — no point deferring an error we can already see.
    pub fn transfer(&self, to: &str, amount: u64) -> Result<TxDraft<'_>, SdkError> {
        let to: Address = to.parse()?;
        Ok(self.draft(TxKind::Transfer, to, amount))
    }

    /// Start a stake operation bonding `amount`. Recipient is forced to the
    /// sender's own address.
    pub fn stake(&self, amount: u64) -> TxDraft<'_> {
        self.draft(TxKind::Stake, self.address(), amount)
    }

    /// Start an unstake operation releasing `amount`.
    pub fn unstake(&self, amount: u64) -> TxDraft<'_> {
        self.draft(TxKind::Unstake, self.address(), amount)
    }

    /// Start a governance proposal with `deposit` at stake.
    ///
    /// The proposal body is JSON-encoded into the payload and size-checked
    /// at build time like any other payload.
    pub fn submit_proposal(
        &self,
        proposal: &ProposalPayload,
        deposit: u64,
    ) -> Result<TxDraft<'_>, SdkError> {
        let payload = serde_json::to_vec(proposal)
            .map_err(|e| SdkError::InvalidTransaction(format!("proposal encoding: {e}")))?;
        let mut draft = self.draft(TxKind::SubmitProposal, self.address(), deposit);
        draft.payload = Some(payload);
        Ok(draft)
    }

    /// Start a vote on `proposal_id`. Votes carry no value: the amount is
    /// fixed to zero regardless of anything the caller does later.
    pub fn vote(&self, proposal_id: u64, option: VoteOption) -> Result<TxDraft<'_>, SdkError> {
        let body = VotePayload {
            proposal_id,
            option,
        };
        let payload = serde_json::to_vec(&body)
            .map_err(|e| SdkError::InvalidTransaction(format!("vote encoding: {e}")))?;
        let mut draft = self.draft(TxKind::Vote, self.address(), 0);
        draft.payload = Some(payload);
        Ok(draft)
    }

    /// Sign a record, returning a signed copy. The input is never mutated.
    ///
    /// Recomputes the canonical signing bytes from the record as given, so
    /// a record edited after a previous signing is simply re-signed over
    /// its current contents.
    pub fn sign(&self, tx: &Transaction) -> Result<Transaction, SdkError> {
        if tx.from != self.address() {
            return Err(SdkError::SigningError(format!(
                "transaction sender {} does not match builder key {}",
                tx.from,
                self.address()
            )));
        }
        let mut signed = tx.clone();
        signed.signature = self.keypair.sign(&tx.signing_bytes());
        Ok(signed)
    }

    fn draft(&self, kind: TxKind, to: Address, amount: u64) -> TxDraft<'_> {
        TxDraft {
            builder: self,
            kind,
            to,
            amount,
            payload: None,
            nonce: 0,
            timestamp: None,
            chain_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TxDraft
// ---------------------------------------------------------------------------

/// An in-progress transaction: the per-kind entry point fixed the shape,
/// the draft collects the remaining knobs.
pub struct TxDraft<'a> {
    builder: &'a TransactionBuilder,
    kind: TxKind,
    to: Address,
    amount: u64,
    payload: Option<Vec<u8>>,
    nonce: u64,
    timestamp: Option<u64>,
    chain_id: Option<String>,
}

impl TxDraft<'_> {
    /// Set the sender nonce. Callers get this from a chain query (or track
    /// it themselves for offline signing).
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Override the timestamp (Unix seconds). Defaults to now at build time.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Override the builder's default chain id for this record only.
    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Attach a raw byte memo. Only valid on transfers.
    pub fn memo(mut self, bytes: Vec<u8>) -> Self {
        self.payload = Some(bytes);
        self
    }

    /// Attach a UTF-8 string memo. Only valid on transfers.
    pub fn memo_str(self, memo: &str) -> Self {
        self.memo(memo.as_bytes().to_vec())
    }

    /// Validate and produce the unsigned record (signature = 64 zero bytes).
    pub fn build(self) -> Result<Transaction, SdkError> {
        // A memo on anything but a transfer means the caller is confused;
        // governance payloads are attached by the entry points themselves.
        if self.payload.is_some() && matches!(self.kind, TxKind::Stake | TxKind::Unstake) {
            return Err(SdkError::InvalidTransaction(format!(
                "{} transactions carry no payload",
                self.kind
            )));
        }

        if let Some(payload) = &self.payload {
            if payload.len() > MAX_PAYLOAD_SIZE {
                return Err(SdkError::InvalidTransaction(format!(
                    "payload is {} bytes, maximum is {}",
                    payload.len(),
                    MAX_PAYLOAD_SIZE
                )));
            }
        }

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp() as u64);

        Ok(Transaction {
            kind: self.kind,
            chain_id: self
                .chain_id
                .unwrap_or_else(|| self.builder.chain_id.clone()),
            from: self.builder.address(),
            to: self.to,
            amount: self.amount,
            payload: self.payload,
            nonce: self.nonce,
            timestamp,
            signature: Signature::zero(),
        })
    }

    /// `build()` followed by `sign()` in one step.
    pub fn build_signed(self) -> Result<Transaction, SdkError> {
        let builder = self.builder;
        let tx = self.build()?;
        builder.sign(&tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_FEE, MAX_PAYLOAD_SIZE, STAKING_FEE};

    fn builder() -> TransactionBuilder {
        TransactionBuilder::new(KeyPair::from_seed(&[5u8; 32]), "meridian-1")
    }

    fn some_address() -> String {
        "ab".repeat(32)
    }

    #[test]
    fn transfer_builds_unsigned_record() {
        let b = builder();
        let tx = b
            .transfer(&some_address(), 1_000_000)
            .unwrap()
            .nonce(1)
            .timestamp(1_700_000_000)
            .build()
            .unwrap();

        assert_eq!(tx.kind, TxKind::Transfer);
        assert_eq!(tx.from, b.address());
        assert_eq!(tx.to, some_address().parse().unwrap());
        assert_eq!(tx.amount, 1_000_000);
        assert_eq!(tx.nonce, 1);
        assert_eq!(tx.chain_id, "meridian-1");
        assert!(tx.payload.is_none());
        assert!(!tx.is_signed());
        assert_eq!(tx.fee(), BASE_FEE);
    }

    #[test]
    fn transfer_rejects_bad_address_immediately() {
        assert!(matches!(
            builder().transfer("not-an-address", 100),
            Err(SdkError::InvalidAddress(_))
        ));
        assert!(builder().transfer("abcd", 100).is_err()); // too short
    }

    #[test]
    fn transfer_memo_variants_agree() {
        let b = builder();
        let from_str = b
            .transfer(&some_address(), 1)
            .unwrap()
            .memo_str("hello")
            .timestamp(1)
            .build()
            .unwrap();
        let from_bytes = b
            .transfer(&some_address(), 1)
            .unwrap()
            .memo(b"hello".to_vec())
            .timestamp(1)
            .build()
            .unwrap();
        assert_eq!(from_str, from_bytes);
        assert_eq!(from_str.payload.as_deref(), Some(b"hello".as_slice()));
    }

    #[test]
    fn oversized_payload_rejected() {
        let result = builder()
            .transfer(&some_address(), 1)
            .unwrap()
            .memo(vec![0u8; MAX_PAYLOAD_SIZE + 1])
            .build();
        assert!(matches!(result, Err(SdkError::InvalidTransaction(_))));

        // Exactly at the limit is fine.
        assert!(builder()
            .transfer(&some_address(), 1)
            .unwrap()
            .memo(vec![0u8; MAX_PAYLOAD_SIZE])
            .build()
            .is_ok());
    }

    #[test]
    fn stake_is_self_addressed_with_no_payload() {
        let b = builder();
        let tx = b.stake(50_000).nonce(2).build().unwrap();
        assert_eq!(tx.kind, TxKind::Stake);
        assert_eq!(tx.to, b.address());
        assert_eq!(tx.from, tx.to);
        assert!(tx.payload.is_none());
        assert_eq!(tx.fee(), STAKING_FEE);

        let tx = b.unstake(50_000).build().unwrap();
        assert_eq!(tx.kind, TxKind::Unstake);
        assert_eq!(tx.to, tx.from);
    }

    #[test]
    fn self_addressed_predicate_matches_built_records() {
        // Every kind the predicate marks self-addressed must come out of
        // the builder with to == from, and a transfer must not.
        let b = builder();
        let proposal = ProposalPayload {
            title: "t".to_string(),
            description: "d".to_string(),
            changes: Default::default(),
        };
        let txs = [
            b.transfer(&some_address(), 1).unwrap().build().unwrap(),
            b.stake(1).build().unwrap(),
            b.unstake(1).build().unwrap(),
            b.submit_proposal(&proposal, 1).unwrap().build().unwrap(),
            b.vote(1, VoteOption::Yes).unwrap().build().unwrap(),
        ];
        for tx in &txs {
            assert_eq!(tx.kind.is_self_addressed(), tx.to == tx.from, "{}", tx.kind);
        }
    }

    #[test]
    fn memo_on_stake_rejected() {
        let result = builder().stake(100).memo(b"why".to_vec()).build();
        assert!(matches!(result, Err(SdkError::InvalidTransaction(_))));
    }

    #[test]
    fn proposal_payload_is_json_body() {
        let b = builder();
        let proposal = ProposalPayload {
            title: "Lower the base fee".to_string(),
            description: "It is too damn high.".to_string(),
            changes: [("base_fee".to_string(), "500".to_string())].into(),
        };
        let tx = b.submit_proposal(&proposal, 250_000).unwrap().build().unwrap();

        assert_eq!(tx.kind, TxKind::SubmitProposal);
        assert_eq!(tx.amount, 250_000);
        assert_eq!(tx.to, tx.from);
        let decoded: ProposalPayload =
            serde_json::from_slice(tx.payload.as_ref().unwrap()).unwrap();
        assert_eq!(decoded, proposal);
        assert_eq!(tx.fee(), STAKING_FEE);
    }

    #[test]
    fn vote_forces_zero_amount() {
        let b = builder();
        let tx = b.vote(42, VoteOption::No).unwrap().build().unwrap();
        assert_eq!(tx.kind, TxKind::Vote);
        assert_eq!(tx.amount, 0);
        assert_eq!(tx.to, tx.from);

        let decoded: VotePayload = serde_json::from_slice(tx.payload.as_ref().unwrap()).unwrap();
        assert_eq!(decoded.proposal_id, 42);
        assert_eq!(decoded.option, VoteOption::No);
    }

    #[test]
    fn chain_id_override_is_per_call() {
        let b = builder();
        let overridden = b.stake(1).chain_id("meridian-test").build().unwrap();
        assert_eq!(overridden.chain_id, "meridian-test");
        // The builder default is untouched.
        let next = b.stake(1).build().unwrap();
        assert_eq!(next.chain_id, "meridian-1");
    }

    #[test]
    fn timestamp_defaults_to_now() {
        let before = Utc::now().timestamp() as u64;
        let tx = builder().stake(1).build().unwrap();
        let after = Utc::now().timestamp() as u64;
        assert!(tx.timestamp >= before && tx.timestamp <= after);
    }

    #[test]
    fn sign_returns_copy_and_never_mutates() {
        let b = builder();
        let tx = b
            .transfer(&some_address(), 10)
            .unwrap()
            .nonce(1)
            .timestamp(1_700_000_000)
            .build()
            .unwrap();

        let signed = b.sign(&tx).unwrap();
        assert!(!tx.is_signed());
        assert!(signed.is_signed());

        // Everything but the signature is byte-identical.
        let mut stripped = signed.clone();
        stripped.signature = Signature::zero();
        assert_eq!(stripped, tx);

        // And the signature verifies over the signing bytes.
        assert!(signed
            .from
            .to_public_key()
            .verify(&signed.signing_bytes(), &signed.signature));
    }

    #[test]
    fn sign_rejects_foreign_sender() {
        let b = builder();
        let other = TransactionBuilder::new(KeyPair::from_seed(&[9u8; 32]), "meridian-1");
        let tx = other.stake(5).build().unwrap();
        assert!(matches!(b.sign(&tx), Err(SdkError::SigningError(_))));
    }

    #[test]
    fn build_signed_matches_manual_flow() {
        let b = builder();
        let manual = {
            let tx = b.stake(7).nonce(3).timestamp(1_700_000_000).build().unwrap();
            b.sign(&tx).unwrap()
        };
        let one_shot = b
            .stake(7)
            .nonce(3)
            .timestamp(1_700_000_000)
            .build_signed()
            .unwrap();
        assert_eq!(manual, one_shot);
    }

    #[test]
    fn editing_a_signed_record_invalidates_the_signature() {
        let b = builder();
        let signed = b.stake(7).timestamp(1).build_signed().unwrap();
        let mut tampered = signed.clone();
        tampered.amount = 8;
        assert!(!tampered
            .from
            .to_public_key()
            .verify(&tampered.signing_bytes(), &tampered.signature));
        // Re-signing fixes it.
        let resigned = b.sign(&tampered).unwrap();
        assert!(resigned
            .from
            .to_public_key()
            .verify(&resigned.signing_bytes(), &resigned.signature));
    }
}
