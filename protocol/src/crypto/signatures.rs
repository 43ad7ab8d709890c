//! # Digital Signatures
//!
//! ECDSA over secp256k1 with SHA-256 as the message digest.
//!
//! [`sign`] and [`verify`] are the entry points the transaction layer uses
//! to sign a hash and to check a signature over one. They wrap
//! [`TallyKeypair::sign`] and [`TallyPublicKey::verify`] and trace each
//! call.
//!
//! ## Failure modes
//!
//! Verification distinguishes exactly two failures, and the transaction
//! layer treats both as "this signature does not prove authorship":
//!
//! - [`SignatureError::Malformed`]: the bytes are not a DER ECDSA signature.
//! - [`SignatureError::VerificationFailed`]: well-formed, but wrong.

use thiserror::Error;
use tracing::trace;

use super::keys::{TallyKeypair, TallyPublicKey, TallySignature};

/// Errors during signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("malformed signature: not a DER-encoded ECDSA signature")]
    Malformed,

    #[error("signature verification failed")]
    VerificationFailed,
}

/// Sign a message using a keypair.
///
/// ```
/// use tally_protocol::crypto::{sign, verify, TallyKeypair};
///
/// let keypair = TallyKeypair::generate();
/// let signature = sign(&keypair, b"send 10 to bob");
/// assert!(verify(&keypair.public_key(), b"send 10 to bob", &signature).is_ok());
/// ```
pub fn sign(keypair: &TallyKeypair, message: &[u8]) -> TallySignature {
    let signature = keypair.sign(message);
    trace!(len = signature.len(), "message signed");
    signature
}

/// Verify a DER signature over `message`.
///
/// High-S signatures are accepted. The caller decides what a
/// [`SignatureError`] means; the transaction layer reports it as an invalid
/// transaction rather than an error.
pub fn verify(
    public_key: &TallyPublicKey,
    message: &[u8],
    signature: &TallySignature,
) -> Result<(), SignatureError> {
    let result = public_key.verify(message, signature);
    trace!(ok = result.is_ok(), "signature checked");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = TallyKeypair::generate();
        let sig = sign(&kp, b"hello, world");
        assert!(verify(&kp.public_key(), b"hello, world", &sig).is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = TallyKeypair::generate();
        let sig = sign(&kp, b"correct message");
        assert_eq!(
            verify(&kp.public_key(), b"wrong message", &sig),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn test_empty_signature_fails() {
        let kp = TallyKeypair::generate();
        let empty = TallySignature::from_bytes(Vec::new());
        assert_eq!(
            verify(&kp.public_key(), b"anything", &empty),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn test_truncated_signature_is_malformed() {
        let kp = TallyKeypair::generate();
        let sig = sign(&kp, b"msg");
        let truncated = TallySignature::from_bytes(&sig.as_bytes()[..sig.len() - 3]);
        assert_eq!(
            verify(&kp.public_key(), b"msg", &truncated),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn test_empty_message() {
        let kp = TallyKeypair::generate();
        let sig = sign(&kp, b"");
        assert!(verify(&kp.public_key(), b"", &sig).is_ok());
    }
}
