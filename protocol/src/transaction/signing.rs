//! Transaction signing.
//!
//! Signing is separate from construction because the key may not be at
//! hand when the transaction is declared (hardware wallet, remote signer).
//! What gets signed is the 32-byte [`Transaction::hash`]; the ECDSA scheme
//! applies SHA-256 to it once more internally.

use tracing::{debug, warn};

use super::record::Transaction;
use super::types::Authorization;
use super::verification::TransactionError;
use crate::crypto::keys::TallyKeypair;
use crate::crypto::signatures;

/// Signs a transaction in place.
///
/// 1. The keypair's canonical address must equal the sender byte-for-byte.
///    Otherwise [`TransactionError::Unauthorized`] is returned and the
///    transaction is left exactly as it was.
/// 2. The transaction hash is signed with ECDSA/SHA-256.
/// 3. The DER signature replaces any previous one.
///
/// Mint transactions have no sender and therefore nobody who may sign them.
///
/// # Example
///
/// ```
/// use tally_protocol::crypto::TallyKeypair;
/// use tally_protocol::identity::Address;
/// use tally_protocol::transaction::{sign_transaction, Transaction};
///
/// let alice = TallyKeypair::generate();
/// let bob = TallyKeypair::generate();
/// let mut tx = Transaction::transfer(alice.address()?, bob.address()?, 10);
///
/// sign_transaction(&mut tx, &alice)?;
/// assert!(tx.is_signed());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn sign_transaction(tx: &mut Transaction, keypair: &TallyKeypair) -> Result<(), TransactionError> {
    let signer = keypair.address()?;

    let Some(sender) = tx.sender() else {
        warn!(
            signer = %signer.fingerprint(),
            "refusing to sign a mint transaction"
        );
        return Err(TransactionError::Unauthorized {
            signer: signer.fingerprint(),
        });
    };

    if *sender != signer {
        warn!(
            signer = %signer.fingerprint(),
            sender = %sender.fingerprint(),
            "refusing to sign on behalf of another identity"
        );
        return Err(TransactionError::Unauthorized {
            signer: signer.fingerprint(),
        });
    }

    let digest = tx.hash();
    debug!(
        sender = %signer.fingerprint(),
        hash = %hex::encode(digest),
        "signing transaction"
    );

    let signature = signatures::sign(keypair, &digest);
    debug!(signature = ?signature, "signature created");

    tx.authorization = Authorization::Signed {
        sender: signer,
        signature,
    };
    Ok(())
}

impl Transaction {
    /// Method form of [`sign_transaction`].
    pub fn sign(&mut self, keypair: &TallyKeypair) -> Result<(), TransactionError> {
        sign_transaction(self, keypair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Address;

    fn alice_to_bob(alice: &TallyKeypair, amount: i64) -> Transaction {
        Transaction::transfer(alice.address().unwrap(), Address::from_pem("bob"), amount)
    }

    #[test]
    fn sign_sets_signature_field() {
        let kp = TallyKeypair::generate();
        let mut tx = alice_to_bob(&kp, 500);

        assert!(!tx.is_signed());
        sign_transaction(&mut tx, &kp).unwrap();
        assert!(tx.is_signed());
        assert!(!tx.signature().unwrap().is_empty());
    }

    #[test]
    fn wrong_key_is_unauthorized_and_leaves_tx_unsigned() {
        let alice = TallyKeypair::generate();
        let mallory = TallyKeypair::generate();
        let mut tx = alice_to_bob(&alice, 10);
        let before = tx.clone();

        match sign_transaction(&mut tx, &mallory) {
            Err(TransactionError::Unauthorized { .. }) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        assert!(tx.signature().is_none());
        assert_eq!(tx, before);
    }

    #[test]
    fn wrong_key_does_not_clobber_existing_signature() {
        let alice = TallyKeypair::generate();
        let mallory = TallyKeypair::generate();
        let mut tx = alice_to_bob(&alice, 10);
        tx.sign(&alice).unwrap();
        let sig = tx.signature().cloned();

        assert!(tx.sign(&mallory).is_err());
        assert_eq!(tx.signature().cloned(), sig);
    }

    #[test]
    fn mint_cannot_be_signed() {
        let kp = TallyKeypair::generate();
        let mut tx = Transaction::mint(Address::from_pem("bob"), 50);

        match tx.sign(&kp) {
            Err(TransactionError::Unauthorized { .. }) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        assert!(tx.is_mint());
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = TallyKeypair::from_bytes(&[7u8; 32]).unwrap();
        let mut tx1 = alice_to_bob(&kp, 100);
        let mut tx2 = alice_to_bob(&kp, 100);

        tx1.sign(&kp).unwrap();
        tx2.sign(&kp).unwrap();

        assert_eq!(
            tx1.signature(),
            tx2.signature(),
            "RFC 6979 signing is deterministic for the same key and message"
        );
    }

    #[test]
    fn re_signing_overwrites_previous_signature() {
        let kp = TallyKeypair::generate();
        let mut tx = alice_to_bob(&kp, 100);

        tx.sign(&kp).unwrap();
        tx.sign(&kp).unwrap();

        assert!(tx.is_signed());
        assert!(tx.is_valid().unwrap());
    }

    #[test]
    fn sender_must_match_byte_for_byte() {
        let kp = TallyKeypair::generate();
        // Same key, but the PEM carries a trailing space: a different address.
        let mut pem = kp.public_key().to_pem().unwrap();
        pem.push(' ');
        let mut tx = Transaction::transfer(Address::from_pem(&pem), Address::from_pem("bob"), 1);

        assert!(matches!(
            tx.sign(&kp),
            Err(TransactionError::Unauthorized { .. })
        ));
    }
}
