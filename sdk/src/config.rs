//! # Protocol Constants
//!
//! Every magic number the SDK shares with the validating network lives here.
//! The fee schedule and the codec widths are consensus-relevant: a client
//! that disagrees with the network on any of these produces transactions
//! that verify locally and bounce at the mempool. Do not tune them casually.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 secret keys are 32 bytes. The seed *is* the key.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 public keys are 32 bytes. The public key doubles as the
/// on-chain account address.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest width. Transaction hashes, Merkle nodes, and derived
/// key material are all 32 bytes.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Fee Schedule
// ---------------------------------------------------------------------------

/// Flat fee for every transfer and vote, in the smallest denomination.
pub const BASE_FEE: u64 = 1_000;

/// Additional fee per started kilobyte of payload. A 1-byte memo and a
/// 1024-byte memo cost the same increment; byte 1025 starts the next one.
pub const FEE_PER_KILOBYTE: u64 = 100;

/// Payload is charged in chunks of this many bytes.
pub const FEE_CHUNK_SIZE: u64 = 1024;

/// Flat fee for Stake, Unstake, and SubmitProposal, regardless of amount
/// or payload size.
pub const STAKING_FEE: u64 = 10_000;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum payload size in bytes. Applies to transfer memos and to the
/// JSON-encoded proposal/vote bodies alike. Matches the mempool-side limit.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// RPC / Timing
// ---------------------------------------------------------------------------

/// Default timeout for a single RPC round trip. Enforced via request
/// cancellation by the HTTP client; a hit maps to [`crate::SdkError::Timeout`],
/// which is deliberately distinct from other transport failures.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Interval between confirmation polls while waiting for a submitted
/// transaction to land in a block.
pub const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default overall budget for a confirmation wait before giving up with
/// [`crate::SdkError::ConfirmationTimeout`].
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Consecutive transport failures tolerated during a confirmation poll
/// before the underlying error is surfaced to the caller. A single dropped
/// packet should not abort a 60-second wait; an unreachable node should.
pub const MAX_POLL_TRANSPORT_FAILURES: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_schedule_sanity() {
        // Staking operations must cost more than a bare transfer, and the
        // per-kilobyte increment must be non-zero or payload spam is free.
        assert!(STAKING_FEE > BASE_FEE);
        assert!(FEE_PER_KILOBYTE > 0);
        assert_eq!(FEE_CHUNK_SIZE, 1024);
    }

    #[test]
    fn crypto_widths() {
        assert_eq!(PRIVATE_KEY_LENGTH, 32);
        assert_eq!(PUBLIC_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(HASH_LENGTH, 32);
    }

    #[test]
    fn timing_sanity() {
        assert!(CONFIRMATION_POLL_INTERVAL < DEFAULT_CONFIRMATION_TIMEOUT);
        assert!(DEFAULT_RPC_TIMEOUT.as_millis() > 0);
    }
}
