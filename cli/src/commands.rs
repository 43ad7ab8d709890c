//! Subcommand handlers.
//!
//! Each handler does its file I/O and returns what should be printed, so
//! `main` only decides where the text goes.

use anyhow::{bail, Context, Result};
use std::path::Path;

use tally_protocol::config::{CURVE_NAME, PROTOCOL_VERSION, SIGNING_ALGORITHM};
use tally_protocol::crypto::TallyKeypair;
use tally_protocol::identity::Address;
use tally_protocol::transaction::{Amount, Transaction, TransactionEnvelope};

/// Outcome of `tally verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid => f.write_str("valid"),
            Verdict::Invalid => f.write_str("invalid"),
        }
    }
}

pub fn keygen() -> Result<String> {
    let keypair = TallyKeypair::generate();
    let address = keypair.address().context("failed to encode address")?;
    tracing::info!(address = %address.fingerprint(), "keypair generated");

    Ok(format!(
        "Secret key : {}\nAddress    :\n{}",
        keypair.to_hex(),
        address.to_pem_lossy()
    ))
}

pub fn address(key_hex: &str) -> Result<String> {
    let keypair = load_keypair(key_hex)?;
    let address = keypair.address().context("failed to encode address")?;
    Ok(address.to_pem_lossy().into_owned())
}

pub fn sign(key_hex: &str, to: &Path, amount: Amount) -> Result<String> {
    let keypair = load_keypair(key_hex)?;
    let sender = keypair.address().context("failed to encode address")?;
    let recipient = read_address(to)?;

    let mut tx = Transaction::transfer(sender, recipient, amount);
    tx.sign(&keypair).context("failed to sign transaction")?;
    tracing::info!(hash = %tx.hash_hex(), amount, "transfer signed");

    encode_envelope(&tx)
}

pub fn mint(to: &Path, amount: Amount) -> Result<String> {
    let recipient = read_address(to)?;
    let tx = Transaction::mint(recipient, amount);
    tracing::info!(hash = %tx.hash_hex(), amount, "mint declared");

    encode_envelope(&tx)
}

pub fn verify(envelope: &Path) -> Result<Verdict> {
    let tx = read_envelope(envelope)?;
    let valid = tx
        .is_valid()
        .with_context(|| format!("cannot validate {}", envelope.display()))?;

    Ok(if valid { Verdict::Valid } else { Verdict::Invalid })
}

pub fn show(envelope: &Path) -> Result<String> {
    let tx = read_envelope(envelope)?;
    let json = tx.to_json().context("failed to encode transaction")?;

    Ok(format!(
        "{tx}\n\n{json}\n\nHash          : {}\nAuthorization : {}",
        tx.hash_hex(),
        tx.authorization()
    ))
}

pub fn version() -> String {
    format!(
        "tally     {}\nprotocol  {}\nsignature {} ({})",
        env!("CARGO_PKG_VERSION"),
        PROTOCOL_VERSION,
        SIGNING_ALGORITHM,
        CURVE_NAME
    )
}

fn load_keypair(key_hex: &str) -> Result<TallyKeypair> {
    TallyKeypair::from_hex(key_hex.trim()).context("invalid signing key")
}

fn read_address(path: &Path) -> Result<Address> {
    let pem = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read address from {}", path.display()))?;
    let address = Address::from_pem(&pem);
    if address.to_public_key().is_err() {
        bail!("{} does not contain a PEM public key", path.display());
    }
    Ok(address)
}

fn read_envelope(path: &Path) -> Result<Transaction> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read envelope {}", path.display()))?;
    let envelope: TransactionEnvelope = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a transaction envelope", path.display()))?;
    Transaction::try_from(envelope)
        .with_context(|| format!("failed to decode envelope {}", path.display()))
}

fn encode_envelope(tx: &Transaction) -> Result<String> {
    serde_json::to_string_pretty(&tx.to_envelope()).context("failed to encode envelope")
}
