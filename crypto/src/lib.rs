//! Cryptographic primitives for the Vapor adapter.
//!
//! - **SHA3-256** for transaction entry ids
//! - **RIPEMD-160** for public key hashes
//! - **bech32** segwit addresses with per-network prefixes
//! - **chainkd** non-hardened derivation over Ed25519 extended public keys

pub mod address;
pub mod chainkd;
pub mod error;
pub mod hash;

pub use address::{decode_address, encode_address, p2wpkh_address, p2wsh_address, validate_address};
pub use chainkd::{derive_address, ChildNumber, DerivationPath, XPub};
pub use error::{AddressError, DerivationError, EncodeError};
pub use hash::{ripemd160, sha3_256, sha3_256_multi};
