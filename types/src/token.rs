//! Token metadata registry.
//!
//! The registry doubles as a filter: transaction entries and balances whose
//! asset is not registered are dropped by the decoder and the node adapter.
//! It is built once at startup and shared read-only (usually behind an `Arc`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Asset id of the native token.
pub const BTM: &str = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
/// Asset id of ETH bridged from the main chain.
pub const ETH: &str = "a0889e1080999e59ed552865a1d3ee677202796222141ccc3552041708aad76c";
/// Asset id of USDT bridged from the main chain.
pub const USDT: &str = "4483893ef7d9aac788c0e9e49a12398c1d35a2172adb1c8dc551fd169a6f5703";

/// Display metadata for a registered asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParam {
    /// Ticker symbol, e.g. `"BTM"`.
    pub code: String,
    /// Number of decimal places of the smallest unit.
    pub decimal: u8,
    /// Whether cross-chain outputs of this asset go to a foreign `0x` address.
    #[serde(default)]
    pub bridged: bool,
}

impl TokenParam {
    pub fn new(code: impl Into<String>, decimal: u8) -> Self {
        Self {
            code: code.into(),
            decimal,
            bridged: false,
        }
    }

    pub fn bridged(mut self) -> Self {
        self.bridged = true;
        self
    }
}

/// Asset id → token metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenRegistry {
    entries: HashMap<String, TokenParam>,
}

impl TokenRegistry {
    /// An empty registry. Every asset will be filtered out.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference deployment table: BTM, ETH and USDT.
    pub fn reference() -> Self {
        let mut registry = Self::empty();
        registry.register(BTM, TokenParam::new("BTM", 8));
        registry.register(ETH, TokenParam::new("ETH", 9).bridged());
        registry.register(USDT, TokenParam::new("USDT", 6).bridged());
        registry
    }

    /// Add or replace an entry, returning the previous one.
    pub fn register(&mut self, asset_id: &str, param: TokenParam) -> Option<TokenParam> {
        self.entries.insert(normalize(asset_id), param)
    }

    pub fn lookup(&self, asset_id: &str) -> Option<&TokenParam> {
        self.entries.get(&normalize(asset_id))
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.lookup(asset_id).is_some()
    }

    /// Whether cross-chain outputs of this asset resolve to a foreign address.
    pub fn is_bridged(&self, asset_id: &str) -> bool {
        self.lookup(asset_id).is_some_and(|p| p.bridged)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(asset_id: &str) -> String {
    asset_id.to_ascii_lowercase()
}
