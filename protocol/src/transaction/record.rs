//! The [`Transaction`] record itself.
//!
//! Fields are private to the crate. After construction the only state that
//! can change is the [`Authorization`], and only through signing.

use tracing::debug;

use super::types::{Amount, Authorization};
use crate::crypto::keys::TallySignature;
use crate::identity::Address;

/// A transfer of `amount` from a sender (or from nowhere, for mints) to a
/// recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) authorization: Authorization,
    pub(crate) recipient: Address,
    pub(crate) amount: Amount,
}

impl Transaction {
    /// Declare a transaction. `sender = None` declares a mint.
    ///
    /// The result is unsigned. Nothing about the fields is validated: a
    /// negative amount or a garbage address is the ledger's problem.
    pub fn new(sender: Option<Address>, recipient: Address, amount: Amount) -> Self {
        let authorization = match sender {
            Some(sender) => Authorization::Unsigned { sender },
            None => Authorization::Minted,
        };
        Self::declare(authorization, recipient, amount)
    }

    /// Declare a sender-backed transfer.
    pub fn transfer(sender: Address, recipient: Address, amount: Amount) -> Self {
        Self::new(Some(sender), recipient, amount)
    }

    /// Declare a mint (e.g. a block reward). Mints need no signature.
    pub fn mint(recipient: Address, amount: Amount) -> Self {
        Self::new(None, recipient, amount)
    }

    /// Rebuild a transaction whose authorization is already known, such as
    /// one decoded from an envelope.
    pub(crate) fn declare(authorization: Authorization, recipient: Address, amount: Amount) -> Self {
        let tx = Self {
            authorization,
            recipient,
            amount,
        };
        debug!(
            hash = %tx.hash_hex(),
            authorization = %tx.authorization,
            "transaction declared"
        );
        tx
    }

    /// The sender, or `None` for a mint.
    pub fn sender(&self) -> Option<&Address> {
        self.authorization.sender()
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The attached signature, if the transaction has been signed.
    pub fn signature(&self) -> Option<&TallySignature> {
        self.authorization.signature()
    }

    pub fn authorization(&self) -> &Authorization {
        &self.authorization
    }

    pub fn is_mint(&self) -> bool {
        matches!(self.authorization, Authorization::Minted)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.authorization, Authorization::Signed { .. })
    }
}
