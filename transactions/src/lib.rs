//! Vapor transactions: wire format, control program classification,
//! transaction ids and normalization.
//!
//! - [`tx`]: typed inputs (spend, veto, cross-chain, coinbase) and outputs
//!   (intra-chain, cross-chain, vote) decoded from the binary format
//! - [`entry`]: the entry-graph hash that serves as the transaction id
//! - [`script`]: P2WPKH / P2WSH detection and address rendering
//! - [`decoder`]: hex in, registry-filtered [`vapor_types::NormalizedTx`] out

pub mod decoder;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod program;
pub mod script;
pub mod tx;

#[cfg(test)]
pub(crate) mod test_utils;

pub use decoder::TxDecoder;
pub use entry::{entry_id, tx_id};
pub use error::{DecodeError, ProgramError};
pub use script::{is_p2w_script, is_p2wpkh_script, is_p2wsh_script, script_to_address, ScriptKind};
pub use tx::{AssetAmount, OutputCommitment, SpendCommitment, Tx, TxInput, TxOutput, TypedInput, TypedOutput};
