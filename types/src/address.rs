//! Witness programs and the placeholder address for non-standard scripts.

use std::fmt;

/// Address reported for control programs that are not standard witness
/// programs (multisig, contracts, `OP_TRUE`, ...).
pub const SMART_CONTRACT: &str = "smart contract";

/// Payload committed to by a version-0 witness program.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum WitnessProgram {
    /// RIPEMD-160 of a public key (P2WPKH).
    PubKeyHash([u8; 20]),
    /// SHA3-256 of a witness script (P2WSH).
    ScriptHash([u8; 32]),
}

impl WitnessProgram {
    /// Build from a raw payload, choosing the kind by length.
    pub fn from_slice(payload: &[u8]) -> Option<Self> {
        match payload.len() {
            20 => {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(payload);
                Some(Self::PubKeyHash(hash))
            }
            32 => {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(payload);
                Some(Self::ScriptHash(hash))
            }
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::PubKeyHash(h) => h,
            Self::ScriptHash(h) => h,
        }
    }

    pub fn is_pubkey_hash(&self) -> bool {
        matches!(self, Self::PubKeyHash(_))
    }
}

impl fmt::Debug for WitnessProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PubKeyHash(h) => write!(f, "PubKeyHash({})", hex::encode(h)),
            Self::ScriptHash(h) => write!(f, "ScriptHash({})", hex::encode(h)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_length() {
        assert!(WitnessProgram::from_slice(&[1u8; 20]).unwrap().is_pubkey_hash());
        assert!(!WitnessProgram::from_slice(&[1u8; 32]).unwrap().is_pubkey_hash());
        assert!(WitnessProgram::from_slice(&[1u8; 21]).is_none());
        assert!(WitnessProgram::from_slice(&[]).is_none());
    }

    #[test]
    fn as_bytes_returns_payload() {
        let wp = WitnessProgram::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(wp.as_bytes(), &[7u8; 32]);
    }
}
