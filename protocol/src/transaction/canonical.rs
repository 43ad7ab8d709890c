//! Canonical text form and content hash.
//!
//! The canonical string is
//!
//! ```text
//! Ammount: <amount> From: <sender> To: <recipient>
//! ```
//!
//! and the transaction hash is SHA-256 over its UTF-8 bytes. The signature
//! is not part of it, so a transaction hashes the same before and after
//! signing.
//!
//! ## Byte rendering
//!
//! Each address renders as a single-quoted byte literal, `b'...'`:
//!
//! - printable ASCII (`0x20..=0x7e`) verbatim, except `\` as `\\` and `'`
//!   as `\'`;
//! - tab, newline and carriage return as `\t`, `\n`, `\r`;
//! - every other byte as `\xNN`, lowercase hex.
//!
//! An absent sender renders as `None`. For a PEM address this is exactly
//! `b'-----BEGIN PUBLIC KEY-----\nMFYw...\n-----END PUBLIC KEY-----\n'`,
//! with the newlines as the two characters `\` `n`.

use std::fmt::{self, Write};

use super::record::Transaction;
use crate::config::{
    CANONICAL_AMOUNT_LABEL, CANONICAL_RECIPIENT_LABEL, CANONICAL_SENDER_LABEL, HASH_OUTPUT_LENGTH,
    MINT_SENDER_RENDERING,
};
use crate::crypto::hash::sha256;

/// Render raw bytes as a byte literal per the module-level rules.
pub fn render_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(byte as char),
            _ => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\x{:02x}", byte);
            }
        }
    }
    out.push('\'');
    out
}

impl Transaction {
    /// The canonical string that is hashed and signed.
    pub fn canonical_string(&self) -> String {
        let sender = match self.sender() {
            Some(sender) => render_bytes(sender.as_bytes()),
            None => MINT_SENDER_RENDERING.to_string(),
        };
        format!(
            "{}: {} {}: {} {}: {}",
            CANONICAL_AMOUNT_LABEL,
            self.amount,
            CANONICAL_SENDER_LABEL,
            sender,
            CANONICAL_RECIPIENT_LABEL,
            render_bytes(self.recipient.as_bytes()),
        )
    }

    /// SHA-256 of the canonical string.
    pub fn hash(&self) -> [u8; HASH_OUTPUT_LENGTH] {
        sha256(self.canonical_string().as_bytes())
    }

    /// Lowercase hex of [`Transaction::hash`].
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }
}

/// The human-readable form is the canonical string.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}
