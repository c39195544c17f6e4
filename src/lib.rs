#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*! # dogecoin-tx

Key derivation, address encoding, raw transaction construction and legacy
(SIGHASH_ALL) signing for Dogecoin. Supports pay-to-public-key-hash inputs and
pay-to-script-hash multisig inputs whose signatures are collected over several calls.

The typed API lives in [`address`], [`messages`], [`script`] and [`transaction`].
[`api`] wraps it in stateless functions that take and return hex strings.

## Usage
```
use dogecoin_tx::address::Address;
use dogecoin_tx::network::Network;
use dogecoin_tx::util::Hash160;

let addr = Address { network: Network::Mainnet, kind: dogecoin_tx::address::AddressKind::P2PKH, hash: Hash160([0; 20]) };
assert_eq!(addr.encode(), "D596YFweJQuHY1BbjazZYmAbt8jJPbKehC");
```

## Logging
Operations log through the [`log`] facade. No logger is installed by the library.

## Scope
Bytes are built and signed, never broadcast. Mnemonics, UTXO lookup and segwit are
not handled.
*/

pub mod address;
pub mod api;
pub mod messages;
pub mod network;
pub mod script;
pub mod transaction;
pub mod util;
pub mod wallet;
