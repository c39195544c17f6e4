//! Hex-string boundary over the library.
//!
//! Every function is stateless: transactions, keys and scripts go in and come out as
//! lowercase hex, addresses as base58 text. Callers carry the transaction hex between
//! calls. Txids are given in display (byte-reversed) order, sighashes in the order
//! they are signed.
//!
//! ```
//! use dogecoin_tx::api;
//!
//! let privkey = format!("{:064x}", 1);
//! let pubkey = api::derive_pubkey(&privkey).unwrap();
//! let address = api::generate_address(&pubkey, "mainnet").unwrap();
//! assert_eq!(address, "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE");
//! ```

use crate::address::Address;
use crate::messages::{OutPoint, Tx};
use crate::network::Network;
use crate::script::multisig::{build_redeem_script, split_pubkeys};
use crate::transaction::assembler::{self, SigningState};
use crate::transaction::{builder, sighash, SigType};
use crate::util::{decode_hex_as, Error, Hash256, Result};
use crate::wallet::keys;
use log::{debug, trace};

/// Compressed public key for a 32-byte private key.
///
/// # Errors
/// `Error::InvalidKey` if the hex or the scalar is invalid.
pub fn derive_pubkey(privkey_hex: &str) -> Result<String> {
    debug!("derive_pubkey");
    let private_key = decode_hex_as(privkey_hex, Error::InvalidKey)?;
    Ok(hex::encode(keys::derive_public_key(&private_key)?))
}

/// P2PKH address for a public key.
///
/// # Errors
/// `Error::InvalidNetwork` for an unknown network, `Error::InvalidKey` for a bad key.
pub fn generate_address(pubkey_hex: &str, network: &str) -> Result<String> {
    debug!("generate_address {} on {}", pubkey_hex, network);
    let network: Network = network.parse()?;
    let pubkey = decode_hex_as(pubkey_hex, Error::InvalidKey)?;
    Ok(Address::from_pubkey(&pubkey, network)?.encode())
}

/// Multisig redeem script from concatenated public keys, in the order given.
///
/// # Errors
/// `Error::InvalidKey` if the keys cannot be split or parsed, `Error::InvalidThreshold`
/// if `threshold` is zero or exceeds the key count.
pub fn generate_redeem_script(pubkeys_hex: &str, threshold: u32) -> Result<String> {
    let pubkeys = split_pubkeys(&decode_hex_as(pubkeys_hex, Error::InvalidKey)?)?;
    debug!("generate_redeem_script {}-of-{}", threshold, pubkeys.len());
    let script = build_redeem_script(&pubkeys, threshold as usize)?;
    trace!("redeem script is {} bytes", script.0.len());
    Ok(script.to_hex())
}

/// P2SH address for a redeem script.
///
/// # Errors
/// `Error::InvalidNetwork` for an unknown network, `Error::InvalidScript` for bad script hex.
pub fn generate_multisig_address(redeem_script_hex: &str, network: &str) -> Result<String> {
    debug!("generate_multisig_address on {}", network);
    let network: Network = network.parse()?;
    let redeem_script = decode_hex_as(redeem_script_hex, Error::InvalidScript)?;
    Ok(Address::from_redeem_script(&redeem_script, network)?.encode())
}

/// Unsigned transaction with one input and no outputs.
///
/// # Errors
/// `Error::InvalidEncoding` if the txid is not 32 bytes of hex.
pub fn generate_base_tx(txid: &str, index: u32) -> Result<String> {
    debug!("generate_base_tx {}:{}", txid, index);
    Ok(builder::new_base(OutPoint::from_txid(txid, index)?).to_hex())
}

/// Appends an unsigned input.
///
/// # Errors
/// `Error::SerializationError` if `tx_hex` is not a transaction, `Error::InvalidEncoding`
/// for a bad txid.
pub fn add_input(tx_hex: &str, txid: &str, index: u32) -> Result<String> {
    debug!("add_input {}:{}", txid, index);
    let tx = parse_tx(tx_hex)?;
    let tx = builder::add_input(&tx, OutPoint::from_txid(txid, index)?);
    trace!("tx now has {} inputs", tx.inputs.len());
    Ok(tx.to_hex())
}

/// Appends an output paying `amount` to `address`.
///
/// # Errors
/// `Error::SerializationError` if `tx_hex` is not a transaction, `Error::InvalidEncoding`
/// for a bad address.
pub fn add_output(tx_hex: &str, address: &str, amount: u64) -> Result<String> {
    debug!("add_output {} to {}", amount, address);
    let tx = parse_tx(tx_hex)?;
    let tx = builder::add_output(&tx, &Address::decode(address)?, amount);
    trace!("tx now has {} outputs", tx.outputs.len());
    Ok(tx.to_hex())
}

/// Unsigned transaction spending every `(txids[i], indexes[i])` and paying
/// `amounts[i]` to `addresses[i]`.
///
/// # Errors
/// `Error::InvalidEncoding` on mismatched lengths or bad txids and addresses,
/// `Error::InputNotFound` if nothing is spent.
pub fn build_raw_tx(txids: &[&str], indexes: &[u32], addresses: &[&str], amounts: &[u64]) -> Result<String> {
    debug!("build_raw_tx with {} inputs and {} outputs", txids.len(), addresses.len());
    if txids.len() != indexes.len() {
        return Err(Error::InvalidEncoding(format!("{} txids but {} indexes", txids.len(), indexes.len())));
    }
    let outpoints = txids
        .iter()
        .zip(indexes)
        .map(|(txid, index)| OutPoint::from_txid(txid, *index))
        .collect::<Result<Vec<_>>>()?;
    let addresses = addresses.iter().map(|a| Address::decode(a)).collect::<Result<Vec<_>>>()?;
    Ok(builder::build_raw_tx(&outpoints, &addresses, amounts)?.to_hex())
}

/// Sighash of the input spending `(txid, index)`.
///
/// `script_hex` is the signer's public key or P2PKH lock script for sig type 0 and the
/// redeem script for sig type 1.
///
/// # Errors
/// `Error::InvalidSigType`, `Error::InputNotFound`, `Error::InvalidScript` or
/// `Error::SerializationError`.
pub fn generate_sighash(tx_hex: &str, txid: &str, index: u32, sig_type: u32, script_hex: &str) -> Result<String> {
    debug!("generate_sighash {}:{} sig type {}", txid, index, sig_type);
    let sig_type = SigType::try_from(sig_type)?;
    let tx = parse_tx(tx_hex)?;
    let script = decode_hex_as(script_hex, Error::InvalidScript)?;
    let hash = sighash::compute_sighash_for(&tx, &OutPoint::from_txid(txid, index)?, sig_type, &script)?;
    Ok(hash.to_hex())
}

/// DER signature (no sighash type byte) over a 32-byte message.
///
/// # Errors
/// `Error::InvalidKey` for a bad private key, `Error::InvalidEncoding` for a bad message.
pub fn generate_signature(message_hex: &str, privkey_hex: &str) -> Result<String> {
    debug!("generate_signature over {}", message_hex);
    let message = Hash256::from_hex(message_hex)?;
    let private_key = decode_hex_as(privkey_hex, Error::InvalidKey)?;
    let signature = crate::transaction::generate_signature(&private_key, &message)?;
    trace!("signature is {} bytes", signature.len());
    Ok(hex::encode(signature))
}

/// Places a signature into the input spending `(txid, index)`.
///
/// For sig type 1 call once per required signature; signatures end up in key order.
///
/// # Errors
/// As [`assembler::apply_signature`], plus `Error::InvalidSigType`,
/// `Error::SerializationError` and `Error::InvalidEncoding` for signature hex that
/// does not decode.
pub fn build_tx(
    tx_hex: &str,
    signature_hex: &str,
    txid: &str,
    index: u32,
    sig_type: u32,
    script_hex: &str,
) -> Result<String> {
    debug!("build_tx {}:{} sig type {}", txid, index, sig_type);
    let sig_type = SigType::try_from(sig_type)?;
    let tx = parse_tx(tx_hex)?;
    let signature = hex::decode(signature_hex)?;
    let script = decode_hex_as(script_hex, Error::InvalidScript)?;
    let outpoint = OutPoint::from_txid(txid, index)?;
    let tx = assembler::apply_signature(&tx, &signature, &outpoint, sig_type, &script)?;
    trace!("signed tx is {} bytes", tx.size());
    Ok(tx.to_hex())
}

/// Signing progress of the input spending `(txid, index)`.
///
/// # Errors
/// `Error::InvalidSigType`, `Error::InputNotFound`, `Error::InvalidScript` or
/// `Error::SerializationError`.
pub fn signing_state(tx_hex: &str, txid: &str, index: u32, sig_type: u32, script_hex: &str) -> Result<SigningState> {
    debug!("signing_state {}:{} sig type {}", txid, index, sig_type);
    let sig_type = SigType::try_from(sig_type)?;
    let tx = parse_tx(tx_hex)?;
    let script = decode_hex_as(script_hex, Error::InvalidScript)?;
    assembler::signing_state(&tx, &OutPoint::from_txid(txid, index)?, sig_type, &script)
}

fn parse_tx(tx_hex: &str) -> Result<Tx> {
    Tx::from_bytes(&decode_hex_as(tx_hex, Error::SerializationError)?)
}
