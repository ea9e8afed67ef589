//! Node-backed adapter.

use std::time::Duration;
use tracing::debug;

use vapor_crypto::DerivationError;
use vapor_types::{Balance, NormalizedTx, TokenRegistry};

use crate::client::ClientAdapter;
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::node::{AccessToken, NodeClient};
use crate::rpc::{
    BlockCountResp, BlockResp, EmptyReq, GetBlockReq, ListBalancesReq, ListTransactionsReq,
    NodeBalance, NodeTransaction, TxIdReq, UnconfirmedTxIdsResp, GET_BLOCK, GET_BLOCK_COUNT,
    GET_TRANSACTION, GET_UNCONFIRMED_TRANSACTION, LIST_BALANCES, LIST_TRANSACTIONS,
    LIST_UNCONFIRMED_TRANSACTIONS,
};

/// Answers chain queries by asking a node over HTTP.
///
/// Transactions and balances reported by the node are projected onto the
/// normalized model and filtered through the token registry, like local
/// decodes. No request is retried.
#[derive(Debug, Clone)]
pub struct ServerAdapter {
    client: ClientAdapter,
    node: NodeClient,
}

impl ServerAdapter {
    /// `access_token` is `user:password`, or empty for no authentication.
    pub fn new(chain_id: &str, node_url: &str, access_token: &str) -> Result<Self, AdapterError> {
        let client = ClientAdapter::new(chain_id)?;
        let auth = AccessToken::parse_optional(access_token)?;
        let node = NodeClient::new(node_url, auth)?;
        Ok(Self { client, node })
    }

    pub fn from_config(config: &AdapterConfig) -> Result<Self, AdapterError> {
        let client = ClientAdapter::from_config(config)?;
        let auth = AccessToken::parse_optional(&config.access_token)?;
        let node = NodeClient::with_timeouts(
            config.node_url.as_str(),
            auth,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )?;
        Ok(Self { client, node })
    }

    pub fn with_registry(
        chain_id: &str,
        registry: TokenRegistry,
        node: NodeClient,
    ) -> Result<Self, AdapterError> {
        let client = ClientAdapter::with_registry(chain_id, registry)?;
        Ok(Self { client, node })
    }

    /// The local adapter sharing this adapter's network and registry.
    pub fn client(&self) -> &ClientAdapter {
        &self.client
    }

    pub fn node(&self) -> &NodeClient {
        &self.node
    }

    pub fn pubkey_to_address(&self, xpub_hex: &str) -> Result<String, DerivationError> {
        self.client.pubkey_to_address(xpub_hex)
    }

    pub async fn get_block_count(&self) -> Result<u64, AdapterError> {
        let resp: BlockCountResp = self.node.request(GET_BLOCK_COUNT, &EmptyReq {}).await?;
        Ok(resp.block_count)
    }

    /// Every transaction in the node's mempool, fetched one by one.
    ///
    /// Fails as a whole if any single lookup fails.
    pub async fn get_raw_mempool(&self) -> Result<Vec<NormalizedTx>, AdapterError> {
        let resp: UnconfirmedTxIdsResp = self
            .node
            .request(LIST_UNCONFIRMED_TRANSACTIONS, &EmptyReq {})
            .await?;
        debug!(count = resp.tx_ids.len(), "mempool listing");

        let mut txs = Vec::with_capacity(resp.tx_ids.len());
        for tx_id in resp.tx_ids {
            let tx: NodeTransaction = self
                .node
                .request(GET_UNCONFIRMED_TRANSACTION, &TxIdReq { tx_id })
                .await?;
            txs.push(tx.normalize(self.client.registry(), &tx.id, 0));
        }
        Ok(txs)
    }

    /// Transactions of the block at `height`, stamped with the block time.
    pub async fn get_block_txs(&self, height: u64) -> Result<Vec<NormalizedTx>, AdapterError> {
        let block: BlockResp = self
            .node
            .request(GET_BLOCK, &GetBlockReq { block_height: height })
            .await?;
        let registry = self.client.registry();
        Ok(block
            .transactions
            .iter()
            .map(|tx| tx.normalize(registry, &tx.id, block.timestamp))
            .collect())
    }

    pub async fn get_transaction(&self, tx_id: &str) -> Result<NormalizedTx, AdapterError> {
        let tx: NodeTransaction = self
            .node
            .request(
                GET_TRANSACTION,
                &TxIdReq {
                    tx_id: tx_id.to_string(),
                },
            )
            .await?;
        Ok(tx.normalize(self.client.registry(), &tx.tx_id, tx.block_time))
    }

    /// Registered-asset balances of a node-side account.
    pub async fn balances_for_account(&self, account_id: &str) -> Result<Vec<Balance>, AdapterError> {
        let resp: Option<Vec<NodeBalance>> = self
            .node
            .request(
                LIST_BALANCES,
                &ListBalancesReq {
                    account_id: account_id.to_string(),
                },
            )
            .await?;
        let registry = self.client.registry();
        Ok(resp
            .unwrap_or_default()
            .iter()
            .filter_map(|b| b.normalize(registry))
            .collect())
    }

    /// Up to `limit` transactions of an account, skipping the first `start`.
    pub async fn txs_for_account(
        &self,
        account_id: &str,
        start: u64,
        limit: u64,
    ) -> Result<Vec<NormalizedTx>, AdapterError> {
        let req = ListTransactionsReq {
            account_id: account_id.to_string(),
            detail: true,
            from: start,
            count: limit,
        };
        let resp: Option<Vec<NodeTransaction>> =
            self.node.request(LIST_TRANSACTIONS, &req).await?;
        let registry = self.client.registry();
        Ok(resp
            .unwrap_or_default()
            .iter()
            .map(|tx| tx.normalize(registry, &tx.tx_id, tx.block_time))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_types::ConfigError;

    #[test]
    fn construction_validates_chain_and_token() {
        assert!(matches!(
            ServerAdapter::new("nope", "http://127.0.0.1:1", ""),
            Err(AdapterError::Config(ConfigError::UnknownChainId(_)))
        ));
        assert!(matches!(
            ServerAdapter::new("mainnet", "http://127.0.0.1:1", "no-colon"),
            Err(AdapterError::Config(ConfigError::InvalidAccessToken))
        ));
        assert!(ServerAdapter::new("mainnet", "http://127.0.0.1:1", "u:p").is_ok());
    }

    #[test]
    fn from_config_uses_configured_tokens() {
        let config = AdapterConfig::from_toml_str(
            r#"
            chain_id = "testnet"
            node_url = "http://10.0.0.1:9889"

            [[tokens]]
            asset_id = "1111111111111111111111111111111111111111111111111111111111111111"
            code = "XYZ"
            decimal = 2
            "#,
        )
        .unwrap();
        let adapter = ServerAdapter::from_config(&config).unwrap();
        assert_eq!(adapter.node().node_url(), "http://10.0.0.1:9889");
        assert_eq!(
            adapter.client().lookup(&"11".repeat(32)).unwrap().code,
            "XYZ"
        );
    }

    #[test]
    fn pubkey_to_address_is_local() {
        let adapter = ServerAdapter::new("testnet", "http://127.0.0.1:1", "").unwrap();
        let xpub = "1c0c2c75073c438b5612005bacdcbde2352277c44a22c5a31aa35899a3369e5fe61bb70eee5c0de48bcefddca59b14162e411b5f11d1966661a25491d48fcdbf";
        assert_eq!(
            adapter.pubkey_to_address(xpub).unwrap(),
            "tp1q3xjrt7ahef583lckefvvhg3djngq0l3rllkkr9"
        );
    }
}
