//! Core type definitions for Tally transactions.

use std::fmt;

use crate::crypto::keys::TallySignature;
use crate::identity::Address;

/// Transfer amount in caller-defined units.
///
/// Signed on purpose: a negative amount is representable and hashes like
/// any other. Whether it is *acceptable* is for the ledger to decide.
pub type Amount = i64;

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Who authorized a transaction, and how far along that authorization is.
///
/// Mint transactions carry no sender and can never be signed. A sender-backed
/// transaction starts `Unsigned` and becomes `Signed` once its owner signs
/// it. An `Unsigned` transaction has no signature field to misread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// System-issued value (block rewards). Always valid, never verified.
    Minted,
    /// Declared by `sender`, not yet signed.
    Unsigned { sender: Address },
    /// Declared and signed by `sender`.
    Signed {
        sender: Address,
        signature: TallySignature,
    },
}

impl Authorization {
    pub fn sender(&self) -> Option<&Address> {
        match self {
            Self::Minted => None,
            Self::Unsigned { sender } | Self::Signed { sender, .. } => Some(sender),
        }
    }

    pub fn signature(&self) -> Option<&TallySignature> {
        match self {
            Self::Signed { signature, .. } => Some(signature),
            _ => None,
        }
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minted => write!(f, "Minted"),
            Self::Unsigned { .. } => write!(f, "Unsigned"),
            Self::Signed { .. } => write!(f, "Signed"),
        }
    }
}
