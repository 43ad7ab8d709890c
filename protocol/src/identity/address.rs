//! # Addresses
//!
//! An address is the canonical encoding of a public key: the PEM
//! SubjectPublicKeyInfo block, as bytes.
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! MFYwEAYHKoZIzj0CAQYFK4EEAAoDQgAE...
//! -----END PUBLIC KEY-----
//! ```
//!
//! Addresses are *opaque* to everything except signature verification.
//! Construction never validates; a recipient address is never decoded at
//! all, and a sender address is decoded only when its signature is checked.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::ADDRESS_FINGERPRINT_HEX_CHARS;
use crate::crypto::hash::sha256_hex;
use crate::crypto::keys::{KeyError, TallyPublicKey};

/// Opaque bytes identifying a participant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: Vec<u8>,
}

impl Address {
    /// Wrap raw address bytes without validating them.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Wrap a PEM string without validating it.
    pub fn from_pem(pem: &str) -> Self {
        Self::from_bytes(pem.as_bytes())
    }

    /// The canonical address of a public key.
    pub fn from_public_key(public_key: &TallyPublicKey) -> Result<Self, KeyError> {
        Ok(Self::from_bytes(public_key.to_pem()?.into_bytes()))
    }

    /// Decode the address back into a public key.
    ///
    /// This is the only place an address is interpreted.
    pub fn to_public_key(&self) -> Result<TallyPublicKey, KeyError> {
        let pem = std::str::from_utf8(&self.bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        TallyPublicKey::from_pem(pem)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The address as text. PEM is ASCII, so this only allocates for
    /// addresses that were never PEM to begin with.
    pub fn to_pem_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Short, log-friendly identifier: the leading hex of SHA-256(address).
    pub fn fingerprint(&self) -> String {
        let mut digest = sha256_hex(&self.bytes);
        digest.truncate(ADDRESS_FINGERPRINT_HEX_CHARS);
        digest
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.fingerprint())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_pem_lossy())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pem = String::deserialize(deserializer)?;
        Ok(Self::from_bytes(pem.into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::TallyKeypair;

    #[test]
    fn address_roundtrips_through_public_key() {
        let kp = TallyKeypair::generate();
        let addr = Address::from_public_key(&kp.public_key()).unwrap();
        assert_eq!(addr.to_public_key().unwrap(), kp.public_key());
    }

    #[test]
    fn same_key_same_address() {
        let kp = TallyKeypair::from_bytes(&[0x42; 32]).unwrap();
        assert_eq!(kp.address().unwrap(), kp.clone().address().unwrap());
    }

    #[test]
    fn opaque_bytes_are_accepted_but_do_not_decode() {
        let addr = Address::from_bytes(b"definitely not a key".to_vec());
        assert!(matches!(addr.to_public_key(), Err(KeyError::InvalidPublicKey)));
    }

    #[test]
    fn non_utf8_address_does_not_decode() {
        let addr = Address::from_bytes(vec![0xff, 0xfe, 0x00]);
        assert!(addr.to_public_key().is_err());
    }

    #[test]
    fn fingerprint_is_short_and_stable() {
        let addr = Address::from_pem("alice");
        assert_eq!(addr.fingerprint().len(), ADDRESS_FINGERPRINT_HEX_CHARS);
        assert_eq!(addr.fingerprint(), Address::from_pem("alice").fingerprint());
        assert_ne!(addr.fingerprint(), Address::from_pem("bob").fingerprint());
    }

    #[test]
    fn serializes_as_pem_string() {
        let kp = TallyKeypair::generate();
        let addr = kp.address().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, recovered);
        assert!(json.contains("BEGIN PUBLIC KEY"));
    }
}
