//! Local, decoder-only adapter.

use std::sync::Arc;
use tracing::debug;

use vapor_crypto::{derive_address, DerivationError, EncodeError};
use vapor_transactions::{DecodeError, TxDecoder};
use vapor_types::{ConfigError, NetParams, NormalizedTx, TokenParam, TokenRegistry};

use crate::config::AdapterConfig;

/// Decodes transactions and derives addresses for one network.
///
/// Holds no connection; every operation is pure and synchronous. Cloning is
/// cheap and clones share the token registry.
#[derive(Debug, Clone)]
pub struct ClientAdapter {
    params: &'static NetParams,
    registry: Arc<TokenRegistry>,
}

impl ClientAdapter {
    /// Adapter for `chain_id` with the reference token table.
    pub fn new(chain_id: &str) -> Result<Self, ConfigError> {
        Self::with_registry(chain_id, TokenRegistry::reference())
    }

    pub fn with_registry(chain_id: &str, registry: TokenRegistry) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(NetParams::for_chain(chain_id)?, registry))
    }

    /// Network and token table (reference plus `[[tokens]]`) from a config.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(config.net_params()?, config.token_registry()?))
    }

    fn from_parts(params: &'static NetParams, registry: TokenRegistry) -> Self {
        debug!(
            chain_id = params.chain_id.as_str(),
            tokens = registry.len(),
            "client adapter ready"
        );
        Self {
            params,
            registry: Arc::new(registry),
        }
    }

    pub fn params(&self) -> &'static NetParams {
        self.params
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn decoder(&self) -> TxDecoder<'_> {
        TxDecoder::new(self.params, &self.registry)
    }

    pub fn decode(&self, raw_hex: &str) -> Result<NormalizedTx, DecodeError> {
        self.decoder().decode(raw_hex)
    }

    pub fn unsigned_hash(&self, raw_hex: &str) -> Result<String, DecodeError> {
        self.decoder().unsigned_hash(raw_hex)
    }

    /// Receive address of an extended public key (128 hex chars).
    pub fn pubkey_to_address(&self, xpub_hex: &str) -> Result<String, DerivationError> {
        derive_address(xpub_hex, self.params)
    }

    pub fn script_to_address(&self, program: &[u8]) -> Result<String, EncodeError> {
        vapor_transactions::script_to_address(program, self.params)
    }

    pub fn lookup(&self, asset_id: &str) -> Option<&TokenParam> {
        self.registry.lookup(asset_id)
    }
}
