//! Transaction validation.
//!
//! [`verify_transaction`] answers one question: does the sender's signature
//! prove the sender authored this transaction? It has three possible
//! outcomes, and callers must keep them apart:
//!
//! - `Ok(true)`: mint, or a signature that verifies.
//! - `Ok(false)`: a signature that does not verify, including bytes that do
//!   not parse as a signature at all. Expected under adversarial input.
//! - `Err(_)`: the transaction cannot be processed (unsigned, or the sender
//!   address does not decode). A bug or protocol violation upstream.

use thiserror::Error;
use tracing::{debug, warn};

use super::record::Transaction;
use super::types::Authorization;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from signing, validating, or decoding a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The signing key's address is not the transaction's sender, or the
    /// transaction is a mint and has no sender to sign for.
    #[error("cannot sign on behalf of another identity (signer {signer})")]
    Unauthorized { signer: String },

    /// A sender-backed transaction reached validation without a signature.
    #[error("transaction must be signed")]
    MissingSignature,

    /// The sender address does not decode as a public key.
    #[error("malformed address {address}: {reason}")]
    MalformedAddress { address: String, reason: String },

    /// The signing key could not produce its own address.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// An envelope carried more signature bytes than any DER ECDSA
    /// signature can hold.
    #[error("signature is {length} bytes, longer than the {max}-byte DER maximum")]
    OversizedSignature { length: usize, max: usize },

    /// An envelope carried a signature that is not valid hex.
    #[error("signature is not valid hex: {0}")]
    SignatureEncoding(#[from] hex::FromHexError),
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Validates a transaction's authorization.
///
/// The states, in order:
///
/// 1. **Mint**: `Ok(true)`. Nothing to verify.
/// 2. **Unsigned** (or signed with zero bytes):
///    [`TransactionError::MissingSignature`].
/// 3. **Signed**: decode the sender into a public key
///    ([`TransactionError::MalformedAddress`] if that fails), recompute the
///    hash, and verify. A mismatch or an unparseable signature is
///    `Ok(false)`, logged at `warn`.
///
/// Identical inputs always give identical outcomes.
pub fn verify_transaction(tx: &Transaction) -> Result<bool, TransactionError> {
    debug!(hash = %tx.hash_hex(), "making sure transaction is valid");

    let (sender, signature) = match &tx.authorization {
        Authorization::Minted => {
            debug!("no sender, treating as mint transaction");
            return Ok(true);
        }
        Authorization::Unsigned { .. } => return Err(TransactionError::MissingSignature),
        Authorization::Signed { sender, signature } => (sender, signature),
    };

    if signature.is_empty() {
        return Err(TransactionError::MissingSignature);
    }

    let public_key = sender
        .to_public_key()
        .map_err(|e| TransactionError::MalformedAddress {
            address: sender.fingerprint(),
            reason: e.to_string(),
        })?;
    debug!(sender = %sender.fingerprint(), "decoded public key from address");

    match signatures::verify(&public_key, &tx.hash(), signature) {
        Ok(()) => {
            debug!("signature valid");
            Ok(true)
        }
        Err(err) => {
            warn!(
                sender = %sender.fingerprint(),
                hash = %tx.hash_hex(),
                signature = ?signature,
                error = %err,
                "transaction failed validation"
            );
            Ok(false)
        }
    }
}

impl Transaction {
    /// Method form of [`verify_transaction`].
    pub fn is_valid(&self) -> Result<bool, TransactionError> {
        verify_transaction(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
