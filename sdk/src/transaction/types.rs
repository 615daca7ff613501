//! Core type definitions for Meridian transactions.
//!
//! These are the vocabulary types: the kind discriminant, the 32-byte
//! address, and the structured payloads carried by governance transactions.
//! Kept small and `Copy`-friendly where possible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::crypto::keys::PublicKey;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// TxKind
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// The ordinal of each kind is the first byte of the canonical encoding and
/// is therefore consensus-fixed: reordering these variants would invalidate
/// every signature on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxKind {
    /// Value transfer between two addresses, with an optional memo payload.
    Transfer = 0,
    /// Bond funds to the sender's own validator/delegation position.
    Stake = 1,
    /// Release previously bonded funds back to the sender.
    Unstake = 2,
    /// Submit a governance proposal; `amount` is the deposit.
    SubmitProposal = 3,
    /// Cast a vote on an open proposal. Carries no value.
    Vote = 4,
}

impl TxKind {
    /// The stable one-byte ordinal used in the canonical encoding.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The snake_case name used in the wire JSON's `tx_type` field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
            Self::SubmitProposal => "submit_proposal",
            Self::Vote => "vote",
        }
    }

    /// Parse a wire `tx_type` string. Unknown names are `None`; the codec
    /// turns that into a hard decode error rather than guessing a default.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "transfer" => Some(Self::Transfer),
            "stake" => Some(Self::Stake),
            "unstake" => Some(Self::Unstake),
            "submit_proposal" => Some(Self::SubmitProposal),
            "vote" => Some(Self::Vote),
            _ => None,
        }
    }

    /// `true` for the kinds that pay the flat staking fee.
    pub fn is_staking(self) -> bool {
        matches!(self, Self::Stake | Self::Unstake | Self::SubmitProposal)
    }

    /// `true` for the kinds whose `to` must equal `from`.
    pub fn is_self_addressed(self) -> bool {
        matches!(
            self,
            Self::Stake | Self::Unstake | Self::SubmitProposal | Self::Vote
        )
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte account address — the raw Ed25519 public key of the account.
///
/// External representation is 64 lowercase hex characters; an optional `0x`
/// prefix is accepted on input and never produced on output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The address of a public key. Identity conversion by design.
    pub fn from_public_key(pk: &PublicKey) -> Self {
        Self(*pk.as_bytes())
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The public key this address names, for signature verification.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey::from_bytes(self.0)
    }
}

impl FromStr for Address {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|_| SdkError::InvalidAddress(s.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SdkError::InvalidAddress(s.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Governance Payloads
// ---------------------------------------------------------------------------

/// Body of a [`TxKind::SubmitProposal`] transaction, JSON-encoded into the
/// payload field.
///
/// `changes` uses a `BTreeMap` so the JSON encoding has a deterministic key
/// order — the encoded bytes are signed, so two clients serializing the
/// same proposal must produce identical payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalPayload {
    /// Short human-readable title.
    pub title: String,
    /// Full proposal text.
    pub description: String,
    /// Parameter changes this proposal enacts, keyed by parameter name.
    pub changes: BTreeMap<String, String>,
}

/// The options a voter can cast on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    /// In favor.
    Yes,
    /// Against.
    No,
    /// Counted for quorum, not for either side.
    Abstain,
}

/// Body of a [`TxKind::Vote`] transaction, JSON-encoded into the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    /// The proposal being voted on.
    pub proposal_id: u64,
    /// The option cast.
    pub option: VoteOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_consensus_fixed() {
        // These values appear as the first byte of every signed encoding.
        // If this test fails, every signature on the network breaks.
        assert_eq!(TxKind::Transfer.ordinal(), 0);
        assert_eq!(TxKind::Stake.ordinal(), 1);
        assert_eq!(TxKind::Unstake.ordinal(), 2);
        assert_eq!(TxKind::SubmitProposal.ordinal(), 3);
        assert_eq!(TxKind::Vote.ordinal(), 4);
    }

    #[test]
    fn wire_names_roundtrip() {
        for kind in [
            TxKind::Transfer,
            TxKind::Stake,
            TxKind::Unstake,
            TxKind::SubmitProposal,
            TxKind::Vote,
        ] {
            assert_eq!(TxKind::from_wire_name(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn unknown_wire_name_is_none() {
        assert_eq!(TxKind::from_wire_name("burn"), None);
        assert_eq!(TxKind::from_wire_name("Transfer"), None);
        assert_eq!(TxKind::from_wire_name(""), None);
    }

    #[test]
    fn address_hex_roundtrip() {
        let addr = Address::from_bytes([0xAB; 32]);
        let hex_str = addr.to_hex();
        assert_eq!(hex_str.len(), 64);
        assert_eq!(hex_str, hex_str.to_lowercase());
        assert_eq!(hex_str.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn address_accepts_0x_prefix() {
        let addr = Address::from_bytes([0x42; 32]);
        let prefixed = format!("0x{}", addr.to_hex());
        assert_eq!(prefixed.parse::<Address>().unwrap(), addr);
        // Output never carries the prefix.
        assert!(!addr.to_hex().starts_with("0x"));
    }

    #[test]
    fn malformed_addresses_rejected() {
        assert!("".parse::<Address>().is_err());
        assert!("deadbeef".parse::<Address>().is_err()); // too short
        assert!(matches!(
            format!("{}ff", "ab".repeat(32)).parse::<Address>(), // too long
            Err(SdkError::InvalidAddress(_))
        ));
        assert!("zz".repeat(32).parse::<Address>().is_err()); // not hex
    }

    #[test]
    fn proposal_payload_json_is_deterministic() {
        let mut changes = BTreeMap::new();
        changes.insert("max_validators".to_string(), "150".to_string());
        changes.insert("block_time".to_string(), "2s".to_string());
        let p = ProposalPayload {
            title: "Raise validator cap".to_string(),
            description: "More validators, more decentralization.".to_string(),
            changes,
        };
        let a = serde_json::to_vec(&p).unwrap();
        let b = serde_json::to_vec(&p).unwrap();
        assert_eq!(a, b);
        // BTreeMap: block_time sorts before max_validators.
        let s = String::from_utf8(a).unwrap();
        assert!(s.find("block_time").unwrap() < s.find("max_validators").unwrap());
    }

    #[test]
    fn vote_payload_serde_roundtrip() {
        let v = VotePayload {
            proposal_id: 12,
            option: VoteOption::Abstain,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"abstain\""));
        let recovered: VotePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(v, recovered);
    }
}
