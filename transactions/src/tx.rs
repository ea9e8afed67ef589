//! Typed transaction model and its binary decoding.
//!
//! ```text
//! tx      = serflags(0x07) version:varint63 time_range:varint63
//!           inputs:varint31 count + input*  outputs:varint31 count + output*
//! input   = asset_version:varint63 commitment:ext witness:ext
//! output  = asset_version:varint63 commitment:ext witness:varstr31
//! ```
//!
//! `ext` is an extensible string (see [`crate::encoding`]). Witness data of
//! outputs is skipped; input witnesses keep their argument lists.

use vapor_types::{AssetId, Hash};

use crate::encoding::Reader;
use crate::error::DecodeError;

/// Serialization flags every supported transaction carries.
pub const SERFLAGS_REQUIRED: u8 = 0x07;
pub const ASSET_VERSION: u64 = 1;
pub const VM_VERSION: u64 = 1;

const INPUT_CROSS_CHAIN: u8 = 0;
const INPUT_SPEND: u8 = 1;
const INPUT_COINBASE: u8 = 2;
const INPUT_VETO: u8 = 3;

const OUTPUT_INTRA_CHAIN: u8 = 0;
const OUTPUT_CROSS_CHAIN: u8 = 1;
const OUTPUT_VOTE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetAmount {
    pub asset_id: AssetId,
    pub amount: u64,
}

/// Reference to the output an input consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendCommitment {
    pub source_id: Hash,
    pub asset_amount: AssetAmount,
    pub source_position: u64,
    pub vm_version: u64,
    pub control_program: Vec<u8>,
}

/// Value and lock of a newly created output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCommitment {
    pub asset_amount: AssetAmount,
    pub vm_version: u64,
    pub control_program: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedInput {
    Spend {
        commitment: SpendCommitment,
        arguments: Vec<Vec<u8>>,
    },
    /// Withdraws a previous vote.
    Veto {
        commitment: SpendCommitment,
        vote: Vec<u8>,
        arguments: Vec<Vec<u8>>,
    },
    /// Brings value over from the main chain.
    CrossChain {
        commitment: SpendCommitment,
        issuance_vm_version: u64,
        asset_definition: Vec<u8>,
        issuance_program: Vec<u8>,
        arguments: Vec<Vec<u8>>,
    },
    Coinbase {
        arbitrary: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    pub asset_version: u64,
    pub typed: TypedInput,
}

impl TxInput {
    /// Value the input brings in. Coinbase inputs spend nothing.
    pub fn asset_amount(&self) -> AssetAmount {
        match &self.typed {
            TypedInput::Spend { commitment, .. }
            | TypedInput::Veto { commitment, .. }
            | TypedInput::CrossChain { commitment, .. } => commitment.asset_amount,
            TypedInput::Coinbase { .. } => AssetAmount {
                asset_id: AssetId::ZERO,
                amount: 0,
            },
        }
    }

    pub fn control_program(&self) -> Option<&[u8]> {
        match &self.typed {
            TypedInput::Spend { commitment, .. }
            | TypedInput::Veto { commitment, .. }
            | TypedInput::CrossChain { commitment, .. } => Some(&commitment.control_program),
            TypedInput::Coinbase { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedOutput {
    IntraChain(OutputCommitment),
    /// Leaves the sidechain; the control program is a foreign-chain address.
    CrossChain(OutputCommitment),
    Vote {
        vote: Vec<u8>,
        commitment: OutputCommitment,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub asset_version: u64,
    pub typed: TypedOutput,
}

impl TxOutput {
    pub fn commitment(&self) -> &OutputCommitment {
        match &self.typed {
            TypedOutput::IntraChain(c) | TypedOutput::CrossChain(c) => c,
            TypedOutput::Vote { commitment, .. } => commitment,
        }
    }

    pub fn asset_amount(&self) -> AssetAmount {
        self.commitment().asset_amount
    }

    pub fn control_program(&self) -> &[u8] {
        &self.commitment().control_program
    }
}

/// A decoded transaction. Signed and unsigned transactions decode alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub version: u64,
    pub time_range: u64,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl Tx {
    pub fn from_hex(raw: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(raw).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(bytes);

        let serflags = r.read_byte()?;
        if serflags != SERFLAGS_REQUIRED {
            return Err(DecodeError::BadSerflags(serflags));
        }
        let version = r.read_varint63()?;
        let time_range = r.read_varint63()?;

        let n_inputs = r.read_varint31()? as usize;
        let mut inputs = Vec::with_capacity(n_inputs.min(r.remaining()));
        for _ in 0..n_inputs {
            inputs.push(read_input(&mut r)?);
        }

        let n_outputs = r.read_varint31()? as usize;
        let mut outputs = Vec::with_capacity(n_outputs.min(r.remaining()));
        for _ in 0..n_outputs {
            outputs.push(read_output(&mut r)?);
        }

        r.finish()?;

        let has_coinbase = inputs
            .iter()
            .any(|i| matches!(i.typed, TypedInput::Coinbase { .. }));
        if has_coinbase && outputs.is_empty() {
            return Err(DecodeError::CoinbaseWithoutOutput);
        }

        Ok(Tx {
            version,
            time_range,
            inputs,
            outputs,
        })
    }
}

fn read_asset_version(r: &mut Reader<'_>) -> Result<u64, DecodeError> {
    let v = r.read_varint63()?;
    if v != ASSET_VERSION {
        return Err(DecodeError::UnsupportedAssetVersion(v));
    }
    Ok(v)
}

fn read_vm_version(r: &mut Reader<'_>) -> Result<u64, DecodeError> {
    let v = r.read_varint63()?;
    if v != VM_VERSION {
        return Err(DecodeError::UnsupportedVmVersion(v));
    }
    Ok(v)
}

fn read_asset_amount(r: &mut Reader<'_>) -> Result<AssetAmount, DecodeError> {
    let asset_id = AssetId::new(r.read_array::<32>()?);
    let amount = r.read_varint63()?;
    Ok(AssetAmount { asset_id, amount })
}

fn read_spend_commitment(r: &mut Reader<'_>) -> Result<SpendCommitment, DecodeError> {
    let (commitment, _suffix) = r.read_extensible(|r| {
        let source_id = Hash::new(r.read_array::<32>()?);
        let asset_amount = read_asset_amount(r)?;
        let source_position = r.read_varint63()?;
        let vm_version = read_vm_version(r)?;
        let control_program = r.read_varstr31()?.to_vec();
        Ok(SpendCommitment {
            source_id,
            asset_amount,
            source_position,
            vm_version,
            control_program,
        })
    })?;
    Ok(commitment)
}

fn read_output_commitment(r: &mut Reader<'_>) -> Result<OutputCommitment, DecodeError> {
    let (commitment, _suffix) = r.read_extensible(|r| {
        let asset_amount = read_asset_amount(r)?;
        let vm_version = read_vm_version(r)?;
        let control_program = r.read_varstr31()?.to_vec();
        Ok(OutputCommitment {
            asset_amount,
            vm_version,
            control_program,
        })
    })?;
    Ok(commitment)
}

fn read_input(r: &mut Reader<'_>) -> Result<TxInput, DecodeError> {
    let asset_version = read_asset_version(r)?;

    let (mut typed, _suffix) = r.read_extensible(|r| {
        let input_type = r.read_byte()?;
        let typed = match input_type {
            INPUT_SPEND => TypedInput::Spend {
                commitment: read_spend_commitment(r)?,
                arguments: Vec::new(),
            },
            INPUT_VETO => TypedInput::Veto {
                commitment: read_spend_commitment(r)?,
                vote: r.read_varstr31()?.to_vec(),
                arguments: Vec::new(),
            },
            INPUT_CROSS_CHAIN => TypedInput::CrossChain {
                commitment: read_spend_commitment(r)?,
                issuance_vm_version: r.read_varint63()?,
                asset_definition: r.read_varstr31()?.to_vec(),
                issuance_program: r.read_varstr31()?.to_vec(),
                arguments: Vec::new(),
            },
            INPUT_COINBASE => TypedInput::Coinbase {
                arbitrary: r.read_varstr31()?.to_vec(),
            },
            other => return Err(DecodeError::UnknownInputType(other)),
        };
        Ok(typed)
    })?;

    let (witness, _suffix) = r.read_extensible(|r| match &typed {
        TypedInput::Spend { .. } | TypedInput::Veto { .. } | TypedInput::CrossChain { .. } => {
            r.read_varstr_list()
        }
        TypedInput::Coinbase { .. } => Ok(Vec::new()),
    })?;

    match &mut typed {
        TypedInput::Spend { arguments, .. }
        | TypedInput::Veto { arguments, .. }
        | TypedInput::CrossChain { arguments, .. } => *arguments = witness,
        TypedInput::Coinbase { .. } => {}
    }

    Ok(TxInput {
        asset_version,
        typed,
    })
}

fn read_output(r: &mut Reader<'_>) -> Result<TxOutput, DecodeError> {
    let asset_version = read_asset_version(r)?;

    let (typed, _suffix) = r.read_extensible(|r| {
        let output_type = r.read_byte()?;
        let typed = match output_type {
            OUTPUT_INTRA_CHAIN => TypedOutput::IntraChain(read_output_commitment(r)?),
            OUTPUT_CROSS_CHAIN => TypedOutput::CrossChain(read_output_commitment(r)?),
            OUTPUT_VOTE => {
                let vote = r.read_varstr31()?.to_vec();
                TypedOutput::Vote {
                    vote,
                    commitment: read_output_commitment(r)?,
                }
            }
            other => return Err(DecodeError::UnknownOutputType(other)),
        };
        Ok(typed)
    })?;

    // Output witness is reserved and carries nothing we use.
    r.read_varstr31()?;

    Ok(TxOutput {
        asset_version,
        typed,
    })
}
