//! # Transaction Module
//!
//! Construction, hashing, signing and validation of Tally transactions. Every
//! movement of value on the ledger is a [`Transaction`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs        : Authorization state and the Amount type
//! record.rs       : The Transaction record and its constructors
//! canonical.rs    : Canonical string, Display, SHA-256 hash
//! signing.rs      : ECDSA signing by the sender's keypair
//! verification.rs : Validation and the TransactionError taxonomy
//! json.rs         : JSON export and the signed envelope
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Declare** with [`Transaction::new`], [`Transaction::transfer`] or
//!    [`Transaction::mint`].
//! 2. **Sign** with [`sign_transaction`] (mints skip this).
//! 3. **Hand off** to the block builder, optionally as a
//!    [`TransactionEnvelope`].
//! 4. **Validate** with [`verify_transaction`].
//!
//! ## Design Decisions
//!
//! - The hash covers `(amount, sender, recipient)` only. The signature is
//!   excluded, otherwise signing would be self-referential.
//! - Authorization is a tagged enum rather than two nullable fields, so a
//!   mint can never be asked for a signature and an unsigned transaction has
//!   no signature to misread.
//! - Validation separates "invalid" (`Ok(false)`) from "unprocessable"
//!   (`Err`).

pub mod canonical;
pub mod json;
pub mod record;
pub mod signing;
pub mod types;
pub mod verification;

pub use canonical::render_bytes;
pub use json::TransactionEnvelope;
pub use record::Transaction;
pub use signing::sign_transaction;
pub use types::{Amount, Authorization};
pub use verification::{verify_transaction, TransactionError};
