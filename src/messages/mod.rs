//! Transaction wire types: outpoints, inputs, outputs and the transaction itself.

mod out_point;
mod tx;
mod tx_in;
mod tx_out;

pub use self::out_point::OutPoint;
pub use self::tx::{Tx, DEFAULT_LOCK_TIME, TX_VERSION};
pub use self::tx_in::{TxIn, DEFAULT_SEQUENCE};
pub use self::tx_out::TxOut;
