//! # Transaction Module
//!
//! Construction, canonical encoding, signing, and wire translation for
//! Meridian transactions. Every transfer, staking operation, and governance
//! action submitted through this SDK is a [`Transaction`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs   — Vocabulary types (TxKind, Address, governance payloads)
//! codec.rs   — Canonical byte encoding, hashing, fees, wire JSON form
//! builder.rs — Per-kind construction and Ed25519 signing
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — a [`TransactionBuilder`] entry point fixes the kind and
//!    shape; the draft collects nonce, timestamp, and memo.
//! 2. **Sign** — `sign()` computes the canonical signing bytes (signature
//!    slot zeroed) and fills in the Ed25519 signature.
//! 3. **Encode** — `to_wire()` produces the JSON form the RPC layer submits.
//! 4. **Identify** — `hash()` is SHA-256 over the full signed encoding, hex.
//!
//! ## Design Decisions
//!
//! - The canonical encoding is little-endian with length-prefixed variable
//!   fields, and every field participates in signing except the signature
//!   itself. An absent payload and an empty payload encode differently and
//!   are therefore distinct signed messages.
//! - All amounts are `u64` in the smallest denomination, and cross the wire
//!   as decimal strings so JavaScript peers never hit the 2^53 cliff.
//! - Fees are derived, never stored: staking kinds pay a flat fee, everything
//!   else pays base plus a per-kilobyte payload charge.

pub mod builder;
pub mod codec;
pub mod types;

pub use builder::{TransactionBuilder, TxDraft};
pub use codec::{Transaction, WireTransaction};
pub use types::{Address, ProposalPayload, TxKind, VoteOption, VotePayload};
