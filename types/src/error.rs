//! Construction-time configuration errors.

use thiserror::Error;

/// Raised while building adapters or registries, never while decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown chain id: {0}")]
    UnknownChainId(String),

    #[error("invalid asset id: {0}")]
    InvalidAssetId(String),

    #[error("invalid access token: expected \"user:password\"")]
    InvalidAccessToken,
}
