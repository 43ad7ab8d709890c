//! # Cryptographic Primitives
//!
//! Everything security-related in Tally flows through here:
//!
//! - **SHA-256** for transaction hashes.
//! - **ECDSA over secp256k1** for signatures, via `k256`.
//! - **SPKI PEM** as the canonical encoding of a public key.
//!
//! Nothing here is hand-rolled. These are thin, typed wrappers over audited
//! RustCrypto implementations.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, sha256_hex};
pub use keys::{KeyError, TallyKeypair, TallyPublicKey, TallySignature};
pub use signatures::{sign, verify, SignatureError};
