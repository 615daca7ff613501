// Copyright (c) 2026 Meridian Foundation. MIT License.
// See LICENSE for details.

//! # Meridian SDK
//!
//! Client library for the Meridian proof-of-stake network: build, encode,
//! sign, and submit transactions, and query chain state — without running
//! a node.
//!
//! The consensus-critical core is the deterministic transaction codec:
//! every validating node reconstructs the exact bytes this crate produces,
//! so the canonical encoding, the SHA-256 transaction hash, the fee
//! schedule, and the Merkle aggregation are all byte-for-byte fixed.
//! Ed25519 for signatures (because we're not barbarians), SHA-256 for
//! every digest, BIP-39 phrases feeding Meridian's own flat derivation.
//!
//! ## Architecture
//!
//! - **crypto** — Hashing, Merkle roots, Ed25519 keys, recovery phrases.
//! - **transaction** — The canonical codec, fees, and the builder.
//! - **rpc** — Typed HTTP client for node REST + JSON-RPC endpoints.
//! - **wallet** — The facade: one key, one chain, nonce handling,
//!   confirmation tracking.
//! - **config** — Protocol constants. Change these and you fork.
//! - **error** — One [`SdkError`] enum for every failure the API can hand
//!   back.
//!
//! ## Quick start
//!
//! ```no_run
//! use meridian_sdk::{TxOptions, Wallet};
//! use meridian_sdk::crypto::keys::KeyPair;
//!
//! # async fn demo() -> Result<(), meridian_sdk::SdkError> {
//! let mut wallet = Wallet::new(KeyPair::generate(), "meridian-1");
//! wallet.connect("http://localhost:26657")?;
//!
//! let pending = wallet
//!     .transfer(&"ab".repeat(32), 1_000_000, None, TxOptions::default())
//!     .await?;
//! let receipt = pending.wait_default().await?;
//! println!("confirmed in block {:?}", receipt.block_height);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Compatibility over elegance: the network's bytes win every argument.
//! 2. No unsafe code, no floating point near money, no global state.
//! 3. Chain-state judgments (balances, nonce ordering) belong to the node;
//!    this crate only surfaces them.

pub mod config;
pub mod crypto;
pub mod error;
pub mod rpc;
pub mod transaction;
pub mod wallet;

pub use error::SdkError;
pub use transaction::{
    Address, ProposalPayload, Transaction, TransactionBuilder, TxKind, VoteOption,
    WireTransaction,
};
pub use wallet::{PendingTransaction, TxOptions, Wallet};
