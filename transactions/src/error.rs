use thiserror::Error;
use vapor_crypto::EncodeError;

/// Failure to turn a raw transaction into its typed or normalized form.
///
/// Every variant except `Address` means the input bytes are malformed; see
/// [`DecodeError::is_malformed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("varint overflows 64 bits")]
    VarintOverflow,

    #[error("value {value} out of range (max {max})")]
    OutOfRange { value: u64, max: u64 },

    #[error("unsupported serialization flags {0:#04x}")]
    BadSerflags(u8),

    #[error("unsupported asset version {0}")]
    UnsupportedAssetVersion(u64),

    #[error("unsupported vm version {0}")]
    UnsupportedVmVersion(u64),

    #[error("unknown input type {0}")]
    UnknownInputType(u8),

    #[error("unknown output type {0}")]
    UnknownOutputType(u8),

    #[error("coinbase input requires at least one output")]
    CoinbaseWithoutOutput,

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("address encoding failed: {0}")]
    Address(#[from] EncodeError),
}

impl DecodeError {
    /// True for errors caused by the transaction bytes themselves.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DecodeError::Address(_))
    }
}

/// Failure to split a VM program into instructions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("short program: opcode {opcode:#04x} at offset {offset} needs {needed} bytes, {remaining} remaining")]
    ShortProgram {
        opcode: u8,
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}
