//! Address handling for Dogecoin: P2PKH and P2SH encoding/decoding in base58check format.
//!
//! The version byte scopes an address to a network and a kind; the payload is always
//! a 20-byte Hash160 and the checksum is the first four bytes of double-SHA256.

use crate::network::Network;
use crate::script::{multisig::MAX_SCRIPT_ELEMENT_SIZE, Script};
use crate::transaction::{p2pkh, p2sh};
use crate::util::{hash160, sha256d, Error, Hash160, Result};
use crate::wallet::keys::parse_public_key;
use base58::{FromBase58, ToBase58};
use std::fmt;
use std::str::FromStr;

/// What the 20-byte payload of an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Hash of a public key
    P2PKH,
    /// Hash of a redeem script
    P2SH,
}

/// A decoded Dogecoin address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Network the address was encoded for
    pub network: Network,
    /// Pubkey-hash or script-hash
    pub kind: AddressKind,
    /// The committed hash
    pub hash: Hash160,
}

impl Address {
    /// Address paying to the hash of a serialized public key.
    ///
    /// # Errors
    /// `Error::InvalidKey` if the bytes are not a valid curve point.
    pub fn from_pubkey(pubkey: &[u8], network: Network) -> Result<Address> {
        parse_public_key(pubkey)?;
        Ok(Address { network, kind: AddressKind::P2PKH, hash: hash160(pubkey) })
    }

    /// Address paying to the hash of a redeem script.
    ///
    /// # Errors
    /// `Error::InvalidScript` if the script is empty or too large to be pushed when spending.
    pub fn from_redeem_script(redeem_script: &[u8], network: Network) -> Result<Address> {
        if redeem_script.is_empty() {
            return Err(Error::InvalidScript("Empty redeem script".to_string()));
        }
        if redeem_script.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(Error::InvalidScript(format!("Redeem script too long: {}", redeem_script.len())));
        }
        Ok(Address { network, kind: AddressKind::P2SH, hash: hash160(redeem_script) })
    }

    /// Version byte for this network and kind.
    #[must_use]
    #[inline]
    pub fn version(&self) -> u8 {
        match self.kind {
            AddressKind::P2PKH => self.network.p2pkh_version(),
            AddressKind::P2SH => self.network.p2sh_version(),
        }
    }

    /// Encodes into base58check text.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_address(self.version(), &self.hash)
    }

    /// Decodes base58check text, identifying network and kind from the version byte.
    ///
    /// # Errors
    /// `Error::InvalidEncoding` on bad base58, length, checksum or unknown version byte.
    pub fn decode(input: &str) -> Result<Address> {
        let (version, hash) = decode_address(input)?;
        for network in [Network::Mainnet, Network::Testnet] {
            if version == network.p2pkh_version() {
                return Ok(Address { network, kind: AddressKind::P2PKH, hash });
            }
            if version == network.p2sh_version() {
                return Ok(Address { network, kind: AddressKind::P2SH, hash });
            }
        }
        Err(Error::InvalidEncoding(format!("Unknown address version 0x{:02x}", version)))
    }

    /// The locking script that pays to this address.
    #[must_use]
    pub fn script_pubkey(&self) -> Script {
        match self.kind {
            AddressKind::P2PKH => p2pkh::create_lock_script(&self.hash),
            AddressKind::P2SH => p2sh::create_lock_script(&self.hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Address> {
        Address::decode(s)
    }
}

/// Encodes a base58check address from version byte and 20-byte payload.
#[must_use]
pub fn encode_address(version: u8, payload: &Hash160) -> String {
    let mut v = [0u8; 25];
    v[0] = version;
    v[1..21].copy_from_slice(&payload.0);
    let checksum = sha256d(&v[..21]);
    v[21..25].copy_from_slice(&checksum.0[..4]);
    v.to_base58()
}

/// Decodes a base58check address into version and payload.
///
/// # Errors
/// `Error::InvalidEncoding` on decode failure, bad length or checksum mismatch.
pub fn decode_address(input: &str) -> Result<(u8, Hash160)> {
    let bytes = input.from_base58()?;
    if bytes.len() != 25 {
        return Err(Error::InvalidEncoding(format!("Invalid address length {}", bytes.len())));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::InvalidEncoding("Invalid address checksum".to_string()));
    }
    let mut hash = Hash160::default();
    hash.0.copy_from_slice(&bytes[1..21]);
    Ok((bytes[0], hash))
}

/// Encodes the P2PKH address of a serialized public key.
///
/// # Errors
/// `Error::InvalidKey` for malformed keys.
pub fn encode_p2pkh(pubkey: &[u8], network: Network) -> Result<String> {
    Ok(Address::from_pubkey(pubkey, network)?.encode())
}

/// Encodes the P2SH address of a redeem script.
///
/// # Errors
/// `Error::InvalidScript` for empty or oversized scripts.
pub fn encode_p2sh(redeem_script: &[u8], network: Network) -> Result<String> {
    Ok(Address::from_redeem_script(redeem_script, network)?.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const G: [u8; 33] = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

    #[test]
    fn zero_hash_addresses() {
        let zero = Hash160::default();
        assert_eq!(encode_address(0x1e, &zero), "D596YFweJQuHY1BbjazZYmAbt8jJPbKehC");
        assert_eq!(encode_address(0x16, &zero), "9rSGfPZLcyCGzY4uYEL1fkzJr6fkicS2rs");
        assert_eq!(encode_address(0x71, &zero), "nUCAGGgZEPN1QyknmQe1oAku817bQAFKFt");
        assert_eq!(encode_address(0xc4, &zero), "2MsFDzHRUAMpjHxKyoEHU3aMCMsVtMqs1PV");
    }

    #[test]
    fn p2pkh_from_pubkey() -> Result<()> {
        assert_eq!(encode_p2pkh(&G, Network::Mainnet)?, "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE");
        assert_eq!(encode_p2pkh(&G, Network::Testnet)?, "nesRpRaAbTDmZHwmzBkLd2AtF7Z9L9z5S2");
        Ok(())
    }

    #[test]
    fn p2pkh_bad_key() {
        let mut bad = G;
        bad[0] = 0x05;
        assert!(matches!(encode_p2pkh(&bad, Network::Mainnet), Err(Error::InvalidKey(_))));
        assert!(matches!(encode_p2pkh(&G[..20], Network::Mainnet), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn decode_round_trip() -> Result<()> {
        let hash = Hash160(hex!("1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b"));
        for network in [Network::Mainnet, Network::Testnet] {
            for kind in [AddressKind::P2PKH, AddressKind::P2SH] {
                let addr = Address { network, kind, hash };
                assert_eq!(Address::decode(&addr.encode())?, addr);
            }
        }
        Ok(())
    }

    #[test]
    fn decode_invalid() {
        let good = "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE";
        let mut bad_checksum = good.to_string();
        bad_checksum.pop();
        bad_checksum.push('F');
        assert!(matches!(Address::decode(&bad_checksum), Err(Error::InvalidEncoding(_))));
        assert!(matches!(Address::decode("0OIl"), Err(Error::InvalidEncoding(_))));
        assert!(matches!(Address::decode("DFpN6QqFfUm3gKN"), Err(Error::InvalidEncoding(_))));
        // Bitcoin mainnet version byte is unknown here
        assert!(matches!(Address::decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"), Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn script_pubkey_dispatch() -> Result<()> {
        let p2pkh = Address::decode("DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE")?;
        assert_eq!(hex::encode(&p2pkh.script_pubkey().0), "76a914751e76e8199196d454941c45d1b3a323f1433bd688ac");
        let p2sh = Address::decode("9tSWmg73oVavHD65qRqUvpANzhcLt1fyGs")?;
        assert_eq!(p2sh.kind, AddressKind::P2SH);
        assert_eq!(hex::encode(&p2sh.script_pubkey().0), "a91415fc0754e73eb85d1cbce08786fadb7320ecb8dc87");
        Ok(())
    }

    #[test]
    fn p2sh_empty_script() {
        assert!(matches!(encode_p2sh(&[], Network::Mainnet), Err(Error::InvalidScript(_))));
    }
}
