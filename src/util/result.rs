//! Standard error and result types for the library.
use base58::FromBase58Error;
use hex::FromHexError;
use std::io;
use thiserror::Error;

/// Standard error type used in the library
#[derive(Debug, Error)]
pub enum Error {
    /// Hex or base58 input could not be decoded
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// The network name is not supported
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),
    /// A private or public key has a bad length or is not on the curve
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// A script is malformed or not of the expected template
    #[error("Invalid script: {0}")]
    InvalidScript(String),
    /// The multisig threshold or key count is out of range
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    /// An input index past the end of the input list
    #[error("Input index {index} out of range for {len} inputs")]
    IndexOutOfRange {
        /// Requested input index
        index: usize,
        /// Number of inputs in the transaction
        len: usize,
    },
    /// No input spends the given outpoint
    #[error("Input not found: {0}")]
    InputNotFound(String),
    /// The signature type is neither P2PKH (0) nor P2SH (1)
    #[error("Invalid sig type: {0}")]
    InvalidSigType(u32),
    /// A signature is malformed or does not commit to the current transaction
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// The input already carries every signature it needs
    #[error("Already fully signed: {0}")]
    AlreadyFullySigned(String),
    /// Transaction bytes could not be parsed
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::InvalidEncoding(format!("hex: {}", e))
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::InvalidEncoding(format!("base58: {:?}", e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;
