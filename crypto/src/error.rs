use thiserror::Error;

/// Failure to turn a witness program into an address string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("malformed witness program: {0}")]
    MalformedWitnessProgram(String),

    #[error("invalid human-readable part: {0}")]
    InvalidHrp(String),

    #[error("bech32 encoding failed: {0}")]
    Bech32(String),
}

/// Failure to parse an address string back into a witness program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid bech32 address: {0}")]
    InvalidEncoding(String),

    #[error("address belongs to network \"{found}\", expected \"{expected}\"")]
    WrongNetwork { expected: String, found: String },

    #[error("unsupported witness version {0}")]
    UnsupportedWitnessVersion(u8),

    #[error("invalid witness program length {0}")]
    InvalidProgramLength(usize),
}

/// Failure while validating or deriving an extended public key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("bad length of pubkey key string: expected 128 hex characters, got {0}")]
    BadLength(usize),

    #[error("pubkey is not valid hex: {0}")]
    InvalidHex(String),

    #[error("invalid xpub: public key is not a canonical curve point")]
    InvalidPoint,

    #[error("cannot derive hardened child {0} from a public key")]
    HardenedFromPublic(u32),

    #[error("child derivation failed: {0}")]
    DerivationFailed(String),

    #[error("address encoding failed: {0}")]
    Address(#[from] EncodeError),
}
