// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally Protocol Core Library
//!
//! Signed, verifiable transfer records: the atomic unit of value on a Tally
//! ledger. A block builder collects them, a wallet signs them, and anyone
//! holding the sender's address can check the signature.
//!
//! ## Architecture
//!
//! - **crypto**: SHA-256, secp256k1 ECDSA keypairs, signatures.
//! - **identity**: Addresses, the canonical PEM encoding of a public key.
//! - **transaction**: Declare, hash, sign, validate, export.
//! - **config**: Every constant that ends up inside a hash.
//!
//! ## Quick start
//!
//! ```
//! use tally_protocol::crypto::TallyKeypair;
//! use tally_protocol::transaction::Transaction;
//!
//! let alice = TallyKeypair::generate();
//! let bob = TallyKeypair::generate();
//!
//! let mut tx = Transaction::transfer(alice.address()?, bob.address()?, 10);
//! tx.sign(&alice)?;
//! assert!(tx.is_valid()?);
//!
//! let reward = Transaction::mint(bob.address()?, 50);
//! assert!(reward.is_valid()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## What this crate does not do
//!
//! Balances, replay protection, fees and block assembly belong to the
//! ledger. This crate only answers "did the sender sign this?".

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
