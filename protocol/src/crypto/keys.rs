//! # Key Management
//!
//! secp256k1 ECDSA keypairs and their public halves.
//!
//! Every participant who can send value holds one of these. The public half,
//! PEM-encoded as a SubjectPublicKeyInfo block, *is* the participant's
//! address (see [`crate::identity::Address`]).
//!
//! ## Security considerations
//!
//! - Signatures are deterministic (RFC 6979). A broken RNG at signing time
//!   cannot leak the private key, which is the classic ECDSA failure mode.
//! - Key generation uses `OsRng`.
//! - Secret key bytes are never logged, and `Debug` never prints them.

use std::fmt;

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::pkcs8::{DecodePublicKey, EncodePublicKey};
use rand::rngs::OsRng;
use thiserror::Error;

use super::signatures::SignatureError;
use crate::config::{ADDRESS_PEM_LINE_ENDING, SECRET_KEY_LENGTH};
use crate::identity::Address;

/// Errors that can occur during key operations.
///
/// Deliberately terse about *why* a key was rejected.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key: not a PEM-encoded secp256k1 SubjectPublicKeyInfo")]
    InvalidPublicKey,

    #[error("public key could not be encoded as PEM")]
    Encoding,
}

/// A secp256k1 keypair used to sign transactions.
///
/// `TallyKeypair` does NOT implement `Serialize`. Exporting a private key
/// should be an explicit call to [`TallyKeypair::to_hex`], never a side
/// effect of dumping a struct into JSON.
///
/// # Examples
///
/// ```
/// use tally_protocol::crypto::keys::TallyKeypair;
///
/// let kp = TallyKeypair::generate();
/// let sig = kp.sign(b"send 10 to bob");
/// assert!(kp.public_key().verify(b"send 10 to bob", &sig).is_ok());
/// ```
pub struct TallyKeypair {
    signing_key: SigningKey,
}

/// The public half of a keypair. Safe to share.
#[derive(Clone, PartialEq, Eq)]
pub struct TallyPublicKey {
    key: VerifyingKey,
}

/// A DER-encoded ECDSA signature.
///
/// Held as raw bytes rather than a parsed `k256` signature because bytes
/// arriving from elsewhere may not parse at all, and that case has to reach
/// the validation boundary as data, not as a panic.
#[derive(Clone, PartialEq, Eq)]
pub struct TallySignature {
    bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// TallyKeypair
// ---------------------------------------------------------------------------

impl TallyKeypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Reconstruct a keypair from the 32-byte secret scalar.
    ///
    /// Fails for zero or for values at or above the curve order.
    pub fn from_bytes(secret: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_slice(secret).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Reconstruct a keypair from a hex-encoded secret scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        let secret: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_bytes(&secret)
    }

    /// Export the raw secret scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        let mut secret = [0u8; SECRET_KEY_LENGTH];
        secret.copy_from_slice(&self.signing_key.to_bytes());
        secret
    }

    /// Export the secret scalar as hex. Handle with even more care.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> TallyPublicKey {
        TallyPublicKey {
            key: *self.signing_key.verifying_key(),
        }
    }

    /// The canonical address for this keypair's public key.
    pub fn address(&self) -> Result<Address, KeyError> {
        Address::from_public_key(&self.public_key())
    }

    /// Sign `message` with ECDSA. SHA-256 is applied to `message` inside the
    /// signature scheme, so callers pass the bytes to be signed, not a
    /// pre-hash of them.
    pub fn sign(&self, message: &[u8]) -> TallySignature {
        let signature: Signature = self.signing_key.sign(message);
        TallySignature {
            bytes: signature.to_der().as_bytes().to_vec(),
        }
    }
}

impl Clone for TallyKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl fmt::Debug for TallyKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TallyKeypair(pub={})", self.public_key().to_sec1_hex())
    }
}

// ---------------------------------------------------------------------------
// TallyPublicKey
// ---------------------------------------------------------------------------

impl TallyPublicKey {
    /// Parse a PEM-encoded SubjectPublicKeyInfo block.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let key = VerifyingKey::from_public_key_pem(pem).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    /// Encode as a PEM SubjectPublicKeyInfo block with LF line endings.
    pub fn to_pem(&self) -> Result<String, KeyError> {
        self.key
            .to_public_key_pem(ADDRESS_PEM_LINE_ENDING)
            .map_err(|_| KeyError::Encoding)
    }

    /// Compressed SEC1 point as hex. Only used for display.
    pub fn to_sec1_hex(&self) -> String {
        hex::encode(self.key.to_encoded_point(true).as_bytes())
    }

    /// Verify a DER signature over `message`.
    ///
    /// High-S signatures are normalized first: other ECDSA implementations
    /// (OpenSSL among them) emit them, and `k256` refuses them outright.
    pub fn verify(&self, message: &[u8], signature: &TallySignature) -> Result<(), SignatureError> {
        let parsed = Signature::from_der(signature.as_bytes()).map_err(|_| SignatureError::Malformed)?;
        let parsed = parsed.normalize_s().unwrap_or(parsed);
        self.key
            .verify(message, &parsed)
            .map_err(|_| SignatureError::VerificationFailed)
    }
}

impl fmt::Debug for TallyPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TallyPublicKey({})", &self.to_sec1_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// TallySignature
// ---------------------------------------------------------------------------

impl TallySignature {
    /// Wrap raw signature bytes. No parsing happens here; malformed bytes
    /// are caught at verification time.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self {
            bytes: hex::decode(s)?,
        })
    }
}

impl fmt::Display for TallySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TallySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        if hex_str.len() > 16 {
            write!(
                f,
                "TallySignature({}...{})",
                &hex_str[..8],
                &hex_str[hex_str.len() - 8..]
            )
        } else {
            write!(f, "TallySignature({})", hex_str)
        }
    }
}
