use thiserror::Error;
use vapor_crypto::DerivationError;
use vapor_transactions::DecodeError;
use vapor_types::ConfigError;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("key derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    #[error("config file error: {0}")]
    ConfigFile(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("node error: {0}")]
    Node(String),

    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}
