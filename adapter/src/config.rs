//! Adapter configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vapor_types::{AssetId, ConfigError, NetParams, TokenParam, TokenRegistry};
use vapor_utils::LogFormat;

use crate::error::AdapterError;

/// Default address of a local node API.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:9889";

/// Configuration for the adapter binary and [`crate::ServerAdapter`].
///
/// Loaded from a TOML file via [`AdapterConfig::from_toml_file`] or built
/// programmatically. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// `mainnet`, `testnet` or `solonet`.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Base URL of the node API.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// `user:password` for basic auth; empty disables auth.
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. `"info"` or `"debug,vapor_adapter=trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Assets registered on top of the reference table.
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// One `[[tokens]]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub asset_id: String,
    pub code: String,
    pub decimal: u8,
    #[serde(default)]
    pub bridged: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> String {
    "mainnet".to_string()
}

fn default_node_url() -> String {
    DEFAULT_NODE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AdapterConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdapterError::ConfigFile(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, AdapterError> {
        toml::from_str(s).map_err(|e| AdapterError::ConfigFile(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, AdapterError> {
        toml::to_string_pretty(self).map_err(|e| AdapterError::ConfigFile(e.to_string()))
    }

    /// Network parameters for `chain_id`.
    pub fn net_params(&self) -> Result<&'static NetParams, ConfigError> {
        NetParams::for_chain(&self.chain_id)
    }

    /// The reference table plus every configured `[[tokens]]` entry.
    ///
    /// Configured entries replace reference entries with the same asset id.
    pub fn token_registry(&self) -> Result<TokenRegistry, ConfigError> {
        let mut registry = TokenRegistry::reference();
        for token in &self.tokens {
            let asset_id: AssetId = token.asset_id.parse()?;
            let mut param = TokenParam::new(token.code.clone(), token.decimal);
            param.bridged = token.bridged;
            registry.register(&asset_id.to_string(), param);
        }
        Ok(registry)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            node_url: default_node_url(),
            access_token: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            tokens: Vec::new(),
        }
    }
}
