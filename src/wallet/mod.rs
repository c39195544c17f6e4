//! Wallet key handling.
//!
//! Mnemonic and seed derivation live outside this crate; keys arrive as raw scalars.

pub mod keys;

pub use self::keys::{derive_public_key, parse_private_key, parse_public_key};
