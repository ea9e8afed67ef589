//! Fundamental types for the Vapor adapter.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! hashes and asset ids, network parameters, the token registry, and the
//! normalized transaction/balance model handed to downstream consumers.

pub mod address;
pub mod error;
pub mod hash;
pub mod network;
pub mod token;
pub mod utxo;

pub use address::{WitnessProgram, SMART_CONTRACT};
pub use error::ConfigError;
pub use hash::{AssetId, Hash};
pub use network::{ChainId, NetParams};
pub use token::{TokenParam, TokenRegistry};
pub use utxo::{Balance, NormalizedTx, Utxo};
