//! Network selection and the address version bytes that go with it.

use crate::util::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Dogecoin network an address is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Main network
    Mainnet,
    /// Test network
    Testnet,
}

impl Network {
    /// Version byte prefixed to pubkey-hash addresses.
    #[must_use]
    #[inline]
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x1e,
            Network::Testnet => 0x71,
        }
    }

    /// Version byte prefixed to script-hash addresses.
    #[must_use]
    #[inline]
    pub fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x16,
            Network::Testnet => 0xc4,
        }
    }

    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Network> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(Error::InvalidNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
