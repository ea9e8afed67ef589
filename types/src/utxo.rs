//! Chain-agnostic transaction and balance projections handed to consumers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::token::TokenRegistry;

/// One input or output of a normalized transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub address: String,
    pub value: u64,
    pub token_identifier: String,
    pub token_code: String,
    pub token_decimal: u8,
}

impl Utxo {
    /// Build a UTXO whose token metadata comes from the registry.
    ///
    /// Returns `None` for unregistered assets; callers drop those entries.
    pub fn from_registry(
        registry: &TokenRegistry,
        address: impl Into<String>,
        value: u64,
        asset_id: &str,
    ) -> Option<Self> {
        let param = registry.lookup(asset_id)?;
        Some(Self {
            address: address.into(),
            value,
            token_identifier: asset_id.to_string(),
            token_code: param.code.clone(),
            token_decimal: param.decimal,
        })
    }
}

/// A transaction reduced to address/value/token records.
///
/// Inputs and outputs keep the order of the source transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTx {
    #[serde(rename = "tx_hash", default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Utxo>,
    #[serde(default)]
    pub outputs: Vec<Utxo>,
    #[serde(rename = "tx_at", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// Per-token balance of an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub token_code: String,
    pub token_identifier: String,
    pub token_decimal: u8,
    pub balance: u64,
}

impl Balance {
    /// Build a balance whose token metadata comes from the registry.
    pub fn from_registry(registry: &TokenRegistry, asset_id: &str, amount: u64) -> Option<Self> {
        let param = registry.lookup(asset_id)?;
        Some(Self {
            token_code: param.code.clone(),
            token_identifier: asset_id.to_string(),
            token_decimal: param.decimal,
            balance: amount,
        })
    }
}
