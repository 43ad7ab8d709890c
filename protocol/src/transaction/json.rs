//! JSON forms of a transaction.
//!
//! Two shapes, both with fixed key names that other tools parse:
//!
//! - The **export** (`From`, `To`, `Ammount`): what the transaction says,
//!   with no signature. Produced by [`Transaction::to_json`].
//! - The **envelope** ([`TransactionEnvelope`]): the export plus an optional
//!   hex `Signature`, so a signed transaction can travel between a wallet
//!   and whoever validates it.
//!
//! Addresses appear as their PEM text; a mint's sender is `null`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::Transaction;
use super::types::{Amount, Authorization};
use super::verification::TransactionError;
use crate::config::MAX_DER_SIGNATURE_LENGTH;
use crate::crypto::keys::TallySignature;
use crate::identity::Address;

#[derive(Serialize)]
struct TransactionExport<'a> {
    #[serde(rename = "From")]
    from: Option<&'a Address>,
    #[serde(rename = "To")]
    to: &'a Address,
    #[serde(rename = "Ammount")]
    amount: Amount,
}

/// Wire form of a possibly-signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    #[serde(rename = "From")]
    pub from: Option<Address>,
    #[serde(rename = "To")]
    pub to: Address,
    #[serde(rename = "Ammount")]
    pub amount: Amount,
    /// Lowercase hex of the DER signature.
    #[serde(rename = "Signature", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Transaction {
    /// Pretty-printed `{"From": .., "To": .., "Ammount": ..}`. Never includes
    /// the signature.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&TransactionExport {
            from: self.sender(),
            to: &self.recipient,
            amount: self.amount,
        })
    }

    pub fn to_envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope::from(self)
    }
}

impl From<&Transaction> for TransactionEnvelope {
    fn from(tx: &Transaction) -> Self {
        Self {
            from: tx.sender().cloned(),
            to: tx.recipient.clone(),
            amount: tx.amount,
            signature: tx.signature().map(TallySignature::to_hex),
        }
    }
}

impl TryFrom<TransactionEnvelope> for Transaction {
    type Error = TransactionError;

    /// A signature on a mint is dropped; an empty signature on a transfer
    /// leaves it unsigned. Neither is an error here: validation decides.
    /// A signature longer than any DER encoding is rejected before decoding.
    fn try_from(envelope: TransactionEnvelope) -> Result<Self, Self::Error> {
        let signature = envelope
            .signature
            .as_deref()
            .filter(|hex_sig| !hex_sig.is_empty())
            .map(decode_signature)
            .transpose()?;

        let authorization = match (envelope.from, signature) {
            (None, signature) => {
                if signature.is_some() {
                    debug!("ignoring signature attached to a mint transaction");
                }
                Authorization::Minted
            }
            (Some(sender), None) => Authorization::Unsigned { sender },
            (Some(sender), Some(signature)) => Authorization::Signed { sender, signature },
        };

        Ok(Transaction::declare(authorization, envelope.to, envelope.amount))
    }
}

fn decode_signature(hex_sig: &str) -> Result<TallySignature, TransactionError> {
    let length = hex_sig.len() / 2;
    if length > MAX_DER_SIGNATURE_LENGTH {
        return Err(TransactionError::OversizedSignature {
            length,
            max: MAX_DER_SIGNATURE_LENGTH,
        });
    }
    Ok(TallySignature::from_hex(hex_sig)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::TallyKeypair;

    #[test]
    fn export_has_fixed_keys_in_order() {
        let tx = Transaction::transfer(Address::from_pem("alice"), Address::from_pem("bob"), 10);
        let json = tx.to_json().unwrap();

        let from = json.find("\"From\"").unwrap();
        let to = json.find("\"To\"").unwrap();
        let amount = json.find("\"Ammount\"").unwrap();
        assert!(from < to && to < amount);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["From"], "alice");
        assert_eq!(value["To"], "bob");
        assert_eq!(value["Ammount"], 10);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn export_omits_signature() {
        let kp = TallyKeypair::generate();
        let mut tx = Transaction::transfer(kp.address().unwrap(), Address::from_pem("bob"), 10);
        tx.sign(&kp).unwrap();

        let value: serde_json::Value = serde_json::from_str(&tx.to_json().unwrap()).unwrap();
        assert!(value.get("Signature").is_none());
        assert!(value["From"].as_str().unwrap().contains("BEGIN PUBLIC KEY"));
    }

    #[test]
    fn mint_export_has_null_sender() {
        let tx = Transaction::mint(Address::from_pem("bob"), 50);
        let value: serde_json::Value = serde_json::from_str(&tx.to_json().unwrap()).unwrap();
        assert!(value["From"].is_null());
        assert_eq!(value["Ammount"], 50);
    }

    #[test]
    fn signed_envelope_survives_the_wire() {
        let alice = TallyKeypair::generate();
        let mut tx = Transaction::transfer(alice.address().unwrap(), Address::from_pem("bob"), 10);
        tx.sign(&alice).unwrap();

        let wire = serde_json::to_string(&tx.to_envelope()).unwrap();
        let envelope: TransactionEnvelope = serde_json::from_str(&wire).unwrap();
        let decoded = Transaction::try_from(envelope).unwrap();

        assert_eq!(decoded, tx);
        assert!(decoded.is_valid().unwrap());
    }

    #[test]
    fn unsigned_envelope_has_no_signature_key() {
        let tx = Transaction::transfer(Address::from_pem("alice"), Address::from_pem("bob"), 10);
        let wire = serde_json::to_string(&tx.to_envelope()).unwrap();
        assert!(!wire.contains("Signature"));
    }

    #[test]
    fn empty_signature_decodes_as_unsigned() {
        let envelope = TransactionEnvelope {
            from: Some(Address::from_pem("alice")),
            to: Address::from_pem("bob"),
            amount: 10,
            signature: Some(String::new()),
        };
        let tx = Transaction::try_from(envelope).unwrap();
        assert!(!tx.is_signed());
        assert!(matches!(tx.is_valid(), Err(TransactionError::MissingSignature)));
    }

    #[test]
    fn signature_on_mint_is_dropped() {
        let envelope = TransactionEnvelope {
            from: None,
            to: Address::from_pem("bob"),
            amount: 50,
            signature: Some("abcd".into()),
        };
        let tx = Transaction::try_from(envelope).unwrap();
        assert!(tx.is_mint());
        assert!(tx.signature().is_none());
    }

    #[test]
    fn oversized_signature_is_rejected_before_decoding() {
        let envelope = TransactionEnvelope {
            from: Some(Address::from_pem("alice")),
            to: Address::from_pem("bob"),
            amount: 10,
            signature: Some("ab".repeat(MAX_DER_SIGNATURE_LENGTH + 1)),
        };
        assert!(matches!(
            Transaction::try_from(envelope),
            Err(TransactionError::OversizedSignature { length, max })
                if length == MAX_DER_SIGNATURE_LENGTH + 1 && max == MAX_DER_SIGNATURE_LENGTH
        ));
    }

    #[test]
    fn maximum_length_signature_is_accepted() {
        let envelope = TransactionEnvelope {
            from: Some(Address::from_pem("alice")),
            to: Address::from_pem("bob"),
            amount: 10,
            signature: Some("ab".repeat(MAX_DER_SIGNATURE_LENGTH)),
        };
        let tx = Transaction::try_from(envelope).unwrap();
        assert_eq!(tx.signature().unwrap().len(), MAX_DER_SIGNATURE_LENGTH);
    }

    #[test]
    fn non_hex_signature_is_rejected() {
        let envelope = TransactionEnvelope {
            from: Some(Address::from_pem("alice")),
            to: Address::from_pem("bob"),
            amount: 10,
            signature: Some("zz".into()),
        };
        assert!(matches!(
            Transaction::try_from(envelope),
            Err(TransactionError::SignatureEncoding(_))
        ));
    }
}
