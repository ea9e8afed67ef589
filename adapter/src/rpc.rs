//! Request and response shapes of the node's JSON API.
//!
//! Every reply is wrapped in a [`NodeResponse`] envelope; the payload types
//! below describe its `data` field per endpoint.

use serde::{Deserialize, Serialize};
use tracing::trace;
use vapor_types::{Balance, NormalizedTx, TokenRegistry, Utxo};

pub const STATUS_SUCCESS: &str = "success";

pub const GET_BLOCK_COUNT: &str = "get-block-count";
pub const LIST_UNCONFIRMED_TRANSACTIONS: &str = "list-unconfirmed-transactions";
pub const GET_UNCONFIRMED_TRANSACTION: &str = "get-unconfirmed-transaction";
pub const GET_BLOCK: &str = "get-block";
pub const GET_TRANSACTION: &str = "get-transaction";
pub const LIST_BALANCES: &str = "list-balances";
pub const LIST_TRANSACTIONS: &str = "list-transactions";

/// Envelope around every node reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResponse {
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub error_detail: String,
}

// ── Requests ───────────────────────────────────────────────────────────

/// Body of endpoints that take no parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyReq {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockReq {
    pub block_height: u64,
}

/// Body of `get-transaction` and `get-unconfirmed-transaction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxIdReq {
    pub tx_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBalancesReq {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTransactionsReq {
    pub account_id: String,
    pub detail: bool,
    pub from: u64,
    pub count: u64,
}

// ── Responses ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockCountResp {
    pub block_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnconfirmedTxIdsResp {
    #[serde(default)]
    pub tx_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResp {
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub transactions: Vec<NodeTransaction>,
}

/// Transaction as annotated by the node's wallet.
///
/// Mempool and block listings fill `id`; account and lookup endpoints fill
/// `tx_id` and `block_time`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTransaction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tx_id: String,
    #[serde(default)]
    pub block_time: u64,
    #[serde(default)]
    pub inputs: Vec<NodeUtxo>,
    #[serde(default)]
    pub outputs: Vec<NodeUtxo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeUtxo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub amount: u64,
    pub asset_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeBalance {
    pub amount: u64,
    pub asset_id: String,
}

fn known_utxos(registry: &TokenRegistry, entries: &[NodeUtxo]) -> Vec<Utxo> {
    entries
        .iter()
        .filter_map(|e| {
            let utxo = Utxo::from_registry(registry, e.address.clone(), e.amount, &e.asset_id);
            if utxo.is_none() {
                trace!(asset_id = %e.asset_id, "skipping unregistered asset");
            }
            utxo
        })
        .collect()
}

impl NodeTransaction {
    /// Project onto the normalized model. Empty hashes and zero times are
    /// left unset.
    pub fn normalize(&self, registry: &TokenRegistry, hash: &str, timestamp: u64) -> NormalizedTx {
        NormalizedTx {
            hash: Some(hash.to_string()).filter(|h| !h.is_empty()),
            inputs: known_utxos(registry, &self.inputs),
            outputs: known_utxos(registry, &self.outputs),
            timestamp: Some(timestamp).filter(|t| *t > 0),
            ..NormalizedTx::default()
        }
    }
}

impl NodeBalance {
    pub fn normalize(&self, registry: &TokenRegistry) -> Option<Balance> {
        Balance::from_registry(registry, &self.asset_id, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_types::token::{BTM, ETH};

    fn node_tx() -> NodeTransaction {
        serde_json::from_value(serde_json::json!({
            "id": "aa",
            "tx_id": "bb",
            "block_time": 1_600_000_000u64,
            "inputs": [
                { "address": "vp1qa", "amount": 10, "asset_id": BTM },
                { "address": "vp1qb", "amount": 11, "asset_id": "00".repeat(32) }
            ],
            "outputs": [
                { "address": "vp1qc", "amount": 12, "asset_id": ETH },
                { "amount": 13, "asset_id": BTM }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn normalize_filters_and_keeps_order() {
        let registry = TokenRegistry::reference();
        let tx = node_tx().normalize(&registry, "bb", 1_600_000_000);
        assert_eq!(tx.hash.as_deref(), Some("bb"));
        assert_eq!(tx.timestamp, Some(1_600_000_000));
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.inputs[0].address, "vp1qa");
        assert_eq!(
            tx.outputs.iter().map(|u| u.value).collect::<Vec<_>>(),
            vec![12, 13]
        );
        assert_eq!(tx.outputs[0].token_code, "ETH");
        assert_eq!(tx.outputs[1].address, "");
    }

    #[test]
    fn empty_hash_and_zero_time_are_unset() {
        let tx = node_tx().normalize(&TokenRegistry::reference(), "", 0);
        assert!(tx.hash.is_none());
        assert!(tx.timestamp.is_none());
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("tx_hash").is_none());
        assert!(json.get("tx_at").is_none());
    }

    #[test]
    fn envelope_defaults() {
        let resp: NodeResponse = serde_json::from_str(r#"{"status":"fail"}"#).unwrap();
        assert_eq!(resp.status, "fail");
        assert!(resp.data.is_null());
        assert!(resp.error_detail.is_empty());
    }

    #[test]
    fn list_transactions_request_shape() {
        let req = ListTransactionsReq {
            account_id: "acc".into(),
            detail: true,
            from: 5,
            count: 20,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "account_id": "acc", "detail": true, "from": 5, "count": 20 })
        );
    }

    #[test]
    fn unknown_balance_dropped() {
        let registry = TokenRegistry::reference();
        let known = NodeBalance { amount: 5, asset_id: BTM.into() };
        let unknown = NodeBalance { amount: 5, asset_id: "11".repeat(32) };
        assert_eq!(known.normalize(&registry).unwrap().token_code, "BTM");
        assert!(unknown.normalize(&registry).is_none());
    }
}
