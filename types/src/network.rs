//! Chain identifiers and their address-encoding parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Identifies which Vapor network an adapter talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// Single-node development network.
    Solonet,
}

impl ChainId {
    pub const ALL: [ChainId; 3] = [ChainId::Mainnet, ChainId::Testnet, ChainId::Solonet];

    /// Identifier as used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Solonet => "solonet",
        }
    }

    /// Address parameters for this network.
    pub fn params(&self) -> &'static NetParams {
        match self {
            Self::Mainnet => &MAINNET,
            Self::Testnet => &TESTNET,
            Self::Solonet => &SOLONET,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownChainId(s.to_string()))
    }
}

/// Network-specific address parameters.
///
/// Both witness address kinds use witness version 0 under the same
/// human-readable part; P2WPKH and P2WSH are told apart by program length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetParams {
    pub chain_id: ChainId,
    /// Human-readable part of bech32 segwit addresses.
    pub bech32_hrp_segwit: &'static str,
}

pub static MAINNET: NetParams = NetParams {
    chain_id: ChainId::Mainnet,
    bech32_hrp_segwit: "vp",
};

pub static TESTNET: NetParams = NetParams {
    chain_id: ChainId::Testnet,
    bech32_hrp_segwit: "tp",
};

pub static SOLONET: NetParams = NetParams {
    chain_id: ChainId::Solonet,
    bech32_hrp_segwit: "sp",
};

impl NetParams {
    /// Look up parameters by chain identifier string.
    pub fn for_chain(chain_id: &str) -> Result<&'static NetParams, ConfigError> {
        Ok(chain_id.parse::<ChainId>()?.params())
    }
}
