//! # Recovery Phrases
//!
//! BIP-39 mnemonic generation and the flat Meridian key-derivation scheme.
//!
//! Phrase generation and validation are standard BIP-39 (English wordlist,
//! entropy checksum included). The phrase-to-key step is NOT standard: there
//! is no BIP-32 hierarchy, no hardened paths, no chain codes. Instead:
//!
//! ```text
//! seed      = bip39_seed(phrase, passphrase)        // 64 bytes, PBKDF2 stretch
//! material  = seed ‖ account_index as u32 BE        // 68 bytes
//! priv_key  = sha256(material)                      // exactly 32 bytes
//! ```
//!
//! This was chosen for implementation simplicity, and every existing account
//! was derived with it. Reproducing it exactly — big-endian index, seed
//! first, single SHA-256 — matters more than standards compliance. Do not
//! "upgrade" this to BIP-44; that would silently change every derived
//! address.

use bip39::Mnemonic;
use thiserror::Error;

use super::hash::sha256;
use super::keys::KeyPair;
use crate::error::SdkError;

/// Word counts accepted by [`generate_phrase`], mapped to entropy strength:
/// 12 → 128 bits, 15 → 160, 18 → 192, 21 → 224, 24 → 256.
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Errors from phrase handling and key derivation.
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// The requested word count is not one of {12, 15, 18, 21, 24}.
    #[error("invalid word count {0}: expected 12, 15, 18, 21, or 24")]
    InvalidWordCount(usize),

    /// The phrase failed BIP-39 parsing or checksum validation.
    #[error("invalid mnemonic phrase: {0}")]
    InvalidPhrase(String),
}

impl From<MnemonicError> for SdkError {
    fn from(err: MnemonicError) -> Self {
        SdkError::InvalidMnemonic(err.to_string())
    }
}

/// Generate a fresh BIP-39 English phrase with the given word count.
///
/// Entropy comes from the OS CSPRNG via the `bip39` crate. The resulting
/// phrase carries the standard checksum, so [`is_valid_phrase`] round-trips.
pub fn generate_phrase(word_count: usize) -> Result<String, MnemonicError> {
    if !VALID_WORD_COUNTS.contains(&word_count) {
        return Err(MnemonicError::InvalidWordCount(word_count));
    }
    let mnemonic = Mnemonic::generate(word_count)
        .map_err(|e| MnemonicError::InvalidPhrase(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// `true` if the phrase parses and its checksum validates.
pub fn is_valid_phrase(phrase: &str) -> bool {
    Mnemonic::parse(phrase).is_ok()
}

/// Derive the keypair for one account index from a recovery phrase.
///
/// See the module docs for the exact construction. Deterministic: the same
/// (phrase, passphrase, index) triple always yields the same keypair, and
/// changing any of the three changes the derived address.
pub fn to_keypair(
    phrase: &str,
    passphrase: &str,
    account_index: u32,
) -> Result<KeyPair, MnemonicError> {
    let mnemonic =
        Mnemonic::parse(phrase).map_err(|e| MnemonicError::InvalidPhrase(e.to_string()))?;
    let seed = mnemonic.to_seed(passphrase);

    // seed first, then the 4-byte big-endian index. Order and endianness
    // are part of the account format.
    let mut material = Vec::with_capacity(seed.len() + 4);
    material.extend_from_slice(&seed);
    material.extend_from_slice(&account_index.to_be_bytes());

    let private_key = sha256(&material);
    Ok(KeyPair::from_seed(&private_key))
}

/// Derive `count` keypairs for account indices `0..count`.
///
/// Each index re-derives independently from the phrase; there is no
/// incremental state, so index 7 here equals index 7 from
/// [`to_keypair`].
pub fn to_keypairs(
    phrase: &str,
    count: u32,
    passphrase: &str,
) -> Result<Vec<KeyPair>, MnemonicError> {
    (0..count).map(|i| to_keypair(phrase, passphrase, i)).collect()
}
