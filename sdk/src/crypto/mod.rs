//! # Cryptographic Primitives
//!
//! Everything security-relevant in the SDK flows through this module, and
//! all of it is a thin, typed wrapper over audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for signatures — deterministic, compact,
//!   and nobody has broken it.
//! - **SHA-256** (`sha2`) for every digest the network computes.
//! - **BIP-39** (`bip39`) for recovery phrases, feeding Meridian's own flat
//!   derivation scheme.
//!
//! If you are tempted to optimize or "modernize" any of this, remember that
//! the validating network reconstructs these exact bytes. Compatibility
//! beats elegance here, every time.

pub mod hash;
pub mod keys;
pub mod mnemonic;

// Re-exports so callers don't have to memorize the module hierarchy.
pub use hash::{merkle_root, sha256, sha256_hex};
pub use keys::{KeyError, KeyPair, PublicKey, SignMode, Signature};
pub use mnemonic::{generate_phrase, is_valid_phrase, to_keypair, to_keypairs, MnemonicError};
