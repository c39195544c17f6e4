//! Incremental construction of unsigned transactions.
//!
//! Every step takes the prior transaction by reference and returns the updated one,
//! so callers can hold transactions as plain values between steps.

use crate::address::Address;
use crate::messages::{OutPoint, Tx, TxIn, TxOut, DEFAULT_LOCK_TIME, TX_VERSION};
use crate::util::{Error, Result};

/// Transaction with version 1, a single unsigned input spending `outpoint`, no outputs
/// and lock time 0.
#[must_use]
pub fn new_base(outpoint: OutPoint) -> Tx {
    Tx {
        version: TX_VERSION,
        inputs: vec![TxIn::unsigned(outpoint)],
        outputs: vec![],
        lock_time: DEFAULT_LOCK_TIME,
    }
}

/// Appends an unsigned input spending `outpoint`.
#[must_use]
pub fn add_input(tx: &Tx, outpoint: OutPoint) -> Tx {
    let mut tx = tx.clone();
    tx.inputs.push(TxIn::unsigned(outpoint));
    tx
}

/// Appends an output paying `amount` to `address`.
#[must_use]
pub fn add_output(tx: &Tx, address: &Address, amount: u64) -> Tx {
    let mut tx = tx.clone();
    tx.outputs.push(TxOut { amount, lock_script: address.script_pubkey() });
    tx
}

/// Builds an unsigned transaction from parallel outpoint and payment lists.
///
/// # Errors
/// `Error::InputNotFound` when `outpoints` is empty, `Error::InvalidEncoding`
/// when `addresses` and `amounts` differ in length.
pub fn build_raw_tx(outpoints: &[OutPoint], addresses: &[Address], amounts: &[u64]) -> Result<Tx> {
    if addresses.len() != amounts.len() {
        return Err(Error::InvalidEncoding(format!(
            "{} addresses but {} amounts",
            addresses.len(),
            amounts.len()
        )));
    }
    let (first, rest) = outpoints
        .split_first()
        .ok_or_else(|| Error::InputNotFound("no outpoints to spend".to_string()))?;
    let mut tx = new_base(*first);
    for outpoint in rest {
        tx = add_input(&tx, *outpoint);
    }
    for (address, amount) in addresses.iter().zip(amounts) {
        tx = add_output(&tx, address, *amount);
    }
    Ok(tx)
}
