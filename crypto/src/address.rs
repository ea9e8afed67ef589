//! Segwit address encoding.
//!
//! Address format: bech32 (BIP-173 checksum) over witness version 0 and the
//! witness program, with the network's human-readable part:
//! `vp1...` on mainnet, `tp1...` on testnet, `sp1...` on solonet.
//!
//! P2WPKH programs are 20-byte public key hashes, P2WSH programs are 32-byte
//! script hashes; both share witness version 0.

use bech32::{segwit, Hrp};
use vapor_types::{NetParams, WitnessProgram};

use crate::error::{AddressError, EncodeError};

fn network_hrp(params: &NetParams) -> Result<Hrp, EncodeError> {
    Hrp::parse(params.bech32_hrp_segwit).map_err(|e| EncodeError::InvalidHrp(e.to_string()))
}

/// Encode a witness program as an address on the given network.
pub fn encode_address(program: &WitnessProgram, params: &NetParams) -> Result<String, EncodeError> {
    let hrp = network_hrp(params)?;
    segwit::encode(hrp, segwit::VERSION_0, program.as_bytes())
        .map_err(|e| EncodeError::Bech32(e.to_string()))
}

/// Pay-to-witness-public-key-hash address from a 20-byte hash.
pub fn p2wpkh_address(pubkey_hash: &[u8], params: &NetParams) -> Result<String, EncodeError> {
    match WitnessProgram::from_slice(pubkey_hash) {
        Some(program @ WitnessProgram::PubKeyHash(_)) => encode_address(&program, params),
        _ => Err(EncodeError::MalformedWitnessProgram(format!(
            "p2wpkh program must be 20 bytes, got {}",
            pubkey_hash.len()
        ))),
    }
}

/// Pay-to-witness-script-hash address from a 32-byte hash.
pub fn p2wsh_address(script_hash: &[u8], params: &NetParams) -> Result<String, EncodeError> {
    match WitnessProgram::from_slice(script_hash) {
        Some(program @ WitnessProgram::ScriptHash(_)) => encode_address(&program, params),
        _ => Err(EncodeError::MalformedWitnessProgram(format!(
            "p2wsh program must be 32 bytes, got {}",
            script_hash.len()
        ))),
    }
}

/// Parse an address and return its witness program.
///
/// Fails on checksum mismatch, a foreign network prefix, or a witness version
/// other than 0.
pub fn decode_address(address: &str, params: &NetParams) -> Result<WitnessProgram, AddressError> {
    let (hrp, version, program) =
        segwit::decode(address).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

    let expected =
        network_hrp(params).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
    if hrp != expected {
        return Err(AddressError::WrongNetwork {
            expected: params.bech32_hrp_segwit.to_string(),
            found: hrp.to_string(),
        });
    }
    if version != segwit::VERSION_0 {
        return Err(AddressError::UnsupportedWitnessVersion(version.to_u8()));
    }

    WitnessProgram::from_slice(&program).ok_or(AddressError::InvalidProgramLength(program.len()))
}

/// Whether the string is a valid address on the given network.
pub fn validate_address(address: &str, params: &NetParams) -> bool {
    decode_address(address, params).is_ok()
}
