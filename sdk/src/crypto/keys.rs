//! # Key Management
//!
//! Ed25519 keypair handling for Meridian accounts. The public key *is* the
//! account address — there is no separate address derivation, no hashing,
//! no checksummed encoding beyond plain hex at the display layer.
//!
//! ## Why Ed25519?
//!
//! - Deterministic signatures: no nonce management, no RNG at signing time.
//! - 32+32 bytes of key material for a 128-bit security level.
//! - Fast verification, which the validating network does thousands of
//!   times per block.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS CSPRNG (`OsRng`).
//! - Secret key bytes are never logged and never appear in `Debug` output.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use super::hash::sha256;
use crate::error::SdkError;

/// Errors from key construction.
///
/// Deliberately vague about *why* material was rejected — error messages
/// are not a channel for leaking key details.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Secret key bytes had the wrong length or were not valid hex.
    #[error("invalid secret key: expected {} bytes", SECRET_KEY_LENGTH)]
    InvalidSecretKey,

    /// Public key bytes had the wrong length or are not a valid curve point.
    #[error("invalid public key")]
    InvalidPublicKey,
}

impl From<KeyError> for SdkError {
    fn from(err: KeyError) -> Self {
        SdkError::KeyGeneration(err.to_string())
    }
}

/// How a [`KeyPair`] digests messages before signing.
///
/// The reference client exposed this as a process-wide toggle; here it is an
/// explicit constructor parameter so two keypairs in one process can use
/// different modes and nothing is ambient. Both sides of a signature must
/// agree on the mode or verification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    /// Sign the message bytes directly. This is what the network expects
    /// for transaction signatures.
    #[default]
    Raw,
    /// Sign `sha256(message)` instead of the message. Useful when the
    /// message is large and the signer is remote or bandwidth-constrained.
    Sha256Prehash,
}

/// An Ed25519 keypair. The atomic unit of identity: every account address
/// and every transaction signature traces back to one of these.
///
/// `KeyPair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a private key should be a deliberate act via
/// [`private_key_bytes`](Self::private_key_bytes), not a side effect of
/// shoving a struct into JSON.
///
/// # Examples
///
/// ```
/// use meridian_sdk::crypto::keys::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"send 100 to alice");
/// assert!(kp.public_key().verify(b"send 100 to alice", &sig));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
    mode: SignMode,
}

/// The public half of a keypair. Doubles as the on-chain account address.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    bytes: [u8; 32],
}

/// A 64-byte Ed25519 signature.
///
/// Stored as a fixed array; a freshly built transaction carries
/// [`Signature::zero`] until it is signed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    bytes: [u8; 64],
}

impl KeyPair {
    /// Generate a fresh keypair from the OS CSPRNG, in [`SignMode::Raw`].
    pub fn generate() -> Self {
        Self::generate_with(SignMode::default())
    }

    /// Generate a fresh keypair with an explicit signing mode.
    pub fn generate_with(mode: SignMode) -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key, mode }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// The seed is used directly as the Ed25519 secret scalar — it is not
    /// passed through any additional key-derivation step. Other client
    /// implementations derive keys the same way, and existing accounts
    /// depend on it, so this must stay bit-for-bit as is.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
            mode: SignMode::default(),
        }
    }

    /// Reconstruct a keypair from raw secret key material of any length.
    ///
    /// Fails unless the slice is exactly 32 bytes. In Ed25519 the 32-byte
    /// secret key *is* the seed, so this is [`from_seed`](Self::from_seed)
    /// with a length check in front.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&arr))
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_private_key(&bytes)
    }

    /// Switch the signing mode, consuming and returning the keypair.
    pub fn with_mode(mut self, mode: SignMode) -> Self {
        self.mode = mode;
        self
    }

    /// The signing mode this keypair was constructed with.
    pub fn mode(&self) -> SignMode {
        self.mode
    }

    /// The public key for this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes — the on-chain address. Safe to share.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message.
    ///
    /// Deterministic: the same (key, message, mode) triple always produces
    /// the same 64 bytes. No randomness is consumed at signing time.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = match self.mode {
            SignMode::Raw => self.signing_key.sign(message),
            SignMode::Sha256Prehash => self.signing_key.sign(&sha256(message)),
        };
        Signature {
            bytes: sig.to_bytes(),
        }
    }

    /// Verify a signature against this keypair's own public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        match self.mode {
            SignMode::Raw => self.public_key().verify(message, signature),
            SignMode::Sha256Prehash => self.public_key().verify(&sha256(message), signature),
        }
    }

    /// Export the raw 32-byte secret key.
    ///
    /// Handle with care: this is the only secret between an attacker and
    /// full control of the account. Don't log it, don't ship it in JSON.
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
            mode: self.mode,
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even partially.
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Keypairs compare by public key. Comparing secret material in
    /// non-constant time is a habit not worth forming.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Wrap raw bytes without curve validation. Verification will simply
    /// return `false` later if the bytes are not a valid point.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Construct from a slice, validating length and that the bytes are a
    /// valid Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Verify a signature over a message.
    ///
    /// Returns a plain bool and never panics: wrong-length material, an
    /// invalid curve point, or a forged signature all come back `false`.
    /// Callers almost never care which.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }

    /// Hex-encoded representation: 64 lowercase characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Base58 representation, for displays where hex is too long.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.bytes).into_string()
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    /// The all-zero placeholder carried by unsigned transactions.
    pub fn zero() -> Self {
        Self { bytes: [0u8; 64] }
    }

    /// Wrap raw 64-byte material.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Parse from a slice; fails unless exactly 64 bytes.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, SdkError> {
        let bytes: [u8; 64] = slice.try_into().map_err(|_| SdkError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }

    /// `true` if this is still the unsigned placeholder.
    pub fn is_zero(&self) -> bool {
        self.bytes == [0u8; 64]
    }

    /// Hex representation: 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        let bytes = hex::decode(s).map_err(|_| SdkError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.to_hex();
        write!(f, "Signature({}...{})", &h[..8], &h[120..])
    }
}
