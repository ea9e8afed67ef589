//! Control program classification and address rendering.

use vapor_crypto::{p2wpkh_address, p2wsh_address, EncodeError};
use vapor_types::{NetParams, SMART_CONTRACT};

use crate::program::{parse_program, Instruction, OP_16, OP_DATA_20, OP_DATA_32, OP_FAIL, OP_TRUE};

pub const P2WPKH_DATA_SIZE: usize = 20;
pub const P2WSH_DATA_SIZE: usize = 32;

/// What kind of lock a control program is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    PayToWitnessPubKeyHash,
    PayToWitnessScriptHash,
    /// A lone `OP_TRUE` or `OP_FAIL`.
    Straightforward,
    Other,
}

impl ScriptKind {
    pub fn classify(prog: &[u8]) -> Self {
        let Ok(insts) = parse_program(prog) else {
            return ScriptKind::Other;
        };
        if is_witness_program(&insts, OP_DATA_20, P2WPKH_DATA_SIZE) {
            ScriptKind::PayToWitnessPubKeyHash
        } else if is_witness_program(&insts, OP_DATA_32, P2WSH_DATA_SIZE) {
            ScriptKind::PayToWitnessScriptHash
        } else if matches!(insts.as_slice(), [inst] if inst.op == OP_TRUE || inst.op == OP_FAIL) {
            ScriptKind::Straightforward
        } else {
            ScriptKind::Other
        }
    }
}

fn is_witness_program(insts: &[Instruction<'_>], push_op: u8, size: usize) -> bool {
    match insts {
        [version, hash] => version.op <= OP_16 && hash.op == push_op && hash.data.len() == size,
        _ => false,
    }
}

pub fn is_p2wpkh_script(prog: &[u8]) -> bool {
    ScriptKind::classify(prog) == ScriptKind::PayToWitnessPubKeyHash
}

pub fn is_p2wsh_script(prog: &[u8]) -> bool {
    ScriptKind::classify(prog) == ScriptKind::PayToWitnessScriptHash
}

/// Witness programs plus the trivially-true and trivially-failing programs.
pub fn is_p2w_script(prog: &[u8]) -> bool {
    ScriptKind::classify(prog) != ScriptKind::Other
}

/// Hash payload of a standard P2WPKH or P2WSH program.
pub fn hash_from_standard_program(prog: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let insts =
        parse_program(prog).map_err(|e| EncodeError::MalformedWitnessProgram(e.to_string()))?;
    match insts.as_slice() {
        [_, hash] => Ok(hash.data.to_vec()),
        _ => Err(EncodeError::MalformedWitnessProgram(format!(
            "expected 2 instructions, found {}",
            insts.len()
        ))),
    }
}

/// Render a control program as an address.
///
/// P2WPKH and P2WSH programs become bech32 addresses on `params`; any other
/// program is reported as [`SMART_CONTRACT`].
pub fn script_to_address(prog: &[u8], params: &NetParams) -> Result<String, EncodeError> {
    match ScriptKind::classify(prog) {
        ScriptKind::PayToWitnessPubKeyHash => p2wpkh_address(&hash_from_standard_program(prog)?, params),
        ScriptKind::PayToWitnessScriptHash => p2wsh_address(&hash_from_standard_program(prog)?, params),
        ScriptKind::Straightforward | ScriptKind::Other => Ok(SMART_CONTRACT.to_string()),
    }
}
