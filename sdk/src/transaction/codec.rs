//! The canonical transaction record and its encodings.
//!
//! This file is the consensus-critical core of the SDK. A [`Transaction`]
//! has exactly three byte-level views:
//!
//! 1. [`Transaction::signing_bytes`] — the canonical binary encoding with a
//!    zeroed signature slot. These are the bytes that get signed, and the
//!    bytes the validating network independently reconstructs to verify the
//!    signature. Any deviation here breaks every signature network-wide.
//! 2. [`Transaction::encoded_bytes`] — the same layout with the real
//!    signature, used for hashing and transport.
//! 3. [`WireTransaction`] — the JSON form for RPC submission, with hex for
//!    byte fields and decimal strings for 64-bit integers (JSON numbers
//!    lose precision past 2^53; strings don't).
//!
//! JSON/serde is deliberately not used for the binary views: field order in
//! a serde encoding is an implementation detail, and the canonical layout
//! must be byte-for-byte stable forever.
//!
//! ## Canonical layout (all integers little-endian)
//!
//! ```text
//! kind ordinal        1 byte
//! chain_id            u64 length prefix + UTF-8 bytes
//! from                32 bytes raw
//! to                  32 bytes raw
//! amount              u64
//! payload             1-byte discriminant (0 absent / 1 present);
//!                     if present: u64 length prefix + raw bytes
//! nonce               u64
//! timestamp           u64
//! signature           64 bytes (zeroed in the signing view)
//! ```

use serde::{Deserialize, Serialize};

use super::types::{Address, TxKind};
use crate::config::{BASE_FEE, FEE_CHUNK_SIZE, FEE_PER_KILOBYTE, STAKING_FEE};
use crate::crypto::hash::sha256;
use crate::crypto::keys::Signature;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A Meridian transaction record.
///
/// Produced unsigned by the builder (signature = 64 zero bytes), signed
/// exactly once, then treated as immutable: changing any field after
/// signing invalidates the signature and requires re-signing. The fee is
/// never stored — it is a pure function of the record (see
/// [`Transaction::fee`]) and appears only in the wire JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The operation this transaction performs.
    pub kind: TxKind,
    /// Network discriminator. May be empty; prevents cross-chain replay
    /// when set.
    pub chain_id: String,
    /// Sender address. Always the signer's public key.
    pub from: Address,
    /// Recipient address. Equals `from` for staking and governance kinds.
    pub to: Address,
    /// Amount in the smallest denomination. 0 for votes; the deposit for
    /// proposals.
    pub amount: u64,
    /// Optional opaque payload: a transfer memo, or the JSON-encoded
    /// proposal/vote body. Absent for Stake/Unstake.
    pub payload: Option<Vec<u8>>,
    /// Strictly increasing per-account sequence number.
    pub nonce: u64,
    /// Unix timestamp in seconds at build time.
    pub timestamp: u64,
    /// Ed25519 signature over [`signing_bytes`](Self::signing_bytes).
    /// All-zero until signed.
    pub signature: Signature,
}

impl Transaction {
    /// Canonical bytes for signing: full layout with the signature slot
    /// zeroed. The signature is never part of what gets signed.
    pub fn signing_bytes(&self) -> Vec<u8> {
        self.encode(&Signature::zero())
    }

    /// Canonical bytes for hashing and transport: full layout with the
    /// actual signature.
    pub fn encoded_bytes(&self) -> Vec<u8> {
        self.encode(&self.signature)
    }

    fn encode(&self, signature: &Signature) -> Vec<u8> {
        let chain_id_bytes = self.chain_id.as_bytes();
        let mut buf = Vec::with_capacity(
            1 + 8
                + chain_id_bytes.len()
                + 32
                + 32
                + 8
                + 1
                + self.payload.as_ref().map_or(0, |p| 8 + p.len())
                + 8
                + 8
                + 64,
        );

        buf.push(self.kind.ordinal());

        buf.extend_from_slice(&(chain_id_bytes.len() as u64).to_le_bytes());
        buf.extend_from_slice(chain_id_bytes);

        buf.extend_from_slice(self.from.as_bytes());
        buf.extend_from_slice(self.to.as_bytes());

        buf.extend_from_slice(&self.amount.to_le_bytes());

        match &self.payload {
            Some(payload) => {
                buf.push(0x01);
                buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
                buf.extend_from_slice(payload);
            }
            None => buf.push(0x00),
        }

        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(signature.as_bytes());

        buf
    }

    /// The transaction hash: lowercase hex of `sha256(encoded_bytes())`.
    ///
    /// Computed over the *signed* encoding, so the hash commits to the
    /// signature as well as the content.
    pub fn hash(&self) -> String {
        hex::encode(sha256(&self.encoded_bytes()))
    }

    /// The fee this transaction owes, derived from the record.
    ///
    /// Staking kinds (Stake, Unstake, SubmitProposal) pay the flat
    /// [`STAKING_FEE`]. Everything else pays [`BASE_FEE`] plus one
    /// [`FEE_PER_KILOBYTE`] increment per *started* kilobyte of payload.
    pub fn fee(&self) -> u64 {
        if self.kind.is_staking() {
            return STAKING_FEE;
        }
        let payload_len = self.payload.as_ref().map_or(0, |p| p.len()) as u64;
        BASE_FEE + payload_len.div_ceil(FEE_CHUNK_SIZE) * FEE_PER_KILOBYTE
    }

    /// `true` once a non-zero signature is present.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_zero()
    }

    /// Convert to the JSON wire form.
    pub fn to_wire(&self) -> WireTransaction {
        WireTransaction {
            tx_type: self.kind.wire_name().to_string(),
            chain_id: self.chain_id.clone(),
            from: self.from.to_hex(),
            to: self.to.to_hex(),
            amount: self.amount.to_string(),
            payload: self.payload.as_ref().map(hex::encode),
            nonce: self.nonce.to_string(),
            timestamp: self.timestamp.to_string(),
            signature: self.signature.to_hex(),
            hash: self.hash(),
            fee: self.fee().to_string(),
        }
    }

    /// Reconstruct a record from its wire form.
    ///
    /// Lossless for every record field. The wire `hash` and `fee` are
    /// derived values and are ignored on decode — they are recomputed from
    /// the record when needed. An unknown `tx_type` is a hard error, not a
    /// fallback to Transfer.
    pub fn from_wire(wire: &WireTransaction) -> Result<Self, SdkError> {
        let kind = TxKind::from_wire_name(&wire.tx_type).ok_or_else(|| {
            SdkError::InvalidTransaction(format!("unknown tx_type: {:?}", wire.tx_type))
        })?;

        let payload = match &wire.payload {
            Some(hex_str) => Some(hex::decode(hex_str).map_err(|_| {
                SdkError::InvalidTransaction("payload is not valid hex".to_string())
            })?),
            None => None,
        };

        let signature_bytes = hex::decode(&wire.signature)
            .map_err(|_| SdkError::InvalidSignature)?;

        Ok(Self {
            kind,
            chain_id: wire.chain_id.clone(),
            from: wire.from.parse()?,
            to: wire.to.parse()?,
            amount: parse_decimal(&wire.amount, "amount")?,
            payload,
            nonce: parse_decimal(&wire.nonce, "nonce")?,
            timestamp: parse_decimal(&wire.timestamp, "timestamp")?,
            signature: Signature::try_from_slice(&signature_bytes)?,
        })
    }
}

fn parse_decimal(s: &str, field: &str) -> Result<u64, SdkError> {
    s.parse::<u64>()
        .map_err(|_| SdkError::InvalidTransaction(format!("malformed {} string: {:?}", field, s)))
}

// ---------------------------------------------------------------------------
// WireTransaction
// ---------------------------------------------------------------------------

/// The JSON wire form of a transaction, as submitted to `tx_submit`.
///
/// All 64-bit integers travel as decimal strings and all byte fields as
/// lowercase hex, so no consumer ever pushes a u64 through a float. `hash`
/// and `fee` are derived from the record and included for the node's and
/// explorers' convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction {
    /// One of "transfer", "stake", "unstake", "submit_proposal", "vote".
    pub tx_type: String,
    /// Network discriminator string.
    pub chain_id: String,
    /// Sender address, 64 hex chars.
    pub from: String,
    /// Recipient address, 64 hex chars.
    pub to: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// Payload as hex, or null when absent.
    pub payload: Option<String>,
    /// Nonce as a decimal string.
    pub nonce: String,
    /// Unix-seconds timestamp as a decimal string.
    pub timestamp: String,
    /// Signature, 128 hex chars.
    pub signature: String,
    /// Transaction hash, 64 hex chars.
    pub hash: String,
    /// Derived fee as a decimal string.
    pub fee: String,
}
