//! Vapor chain adapter.
//!
//! Two facades over the same decoding core:
//!
//! - [`ClientAdapter`]: local decoding, transaction ids and address
//!   derivation, with no I/O
//! - [`ServerAdapter`]: block, mempool and account queries answered by a
//!   node's JSON API, normalized the same way
//!
//! Both filter every transaction entry and balance through a
//! [`vapor_types::TokenRegistry`].

pub mod client;
pub mod config;
pub mod error;
pub mod node;
pub mod rpc;
pub mod server;

pub use client::ClientAdapter;
pub use config::{AdapterConfig, TokenEntry, DEFAULT_NODE_URL};
pub use error::AdapterError;
pub use node::{AccessToken, NodeClient};
pub use server::ServerAdapter;
