//! # Identity
//!
//! Who is sending, and who is receiving. In Tally an identity is nothing
//! more than a public key, and its on-ledger form is an [`Address`].

pub mod address;

pub use address::Address;
