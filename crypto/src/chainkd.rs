//! Non-hardened child key derivation over extended public keys.
//!
//! An extended public key (xpub) is 64 bytes: a compressed Ed25519 point
//! followed by a 32-byte chain code. Child derivation computes
//!
//! ```text
//! h      = HMAC-SHA512(key = chain_code, 'N' || pubkey || selector)
//! f      = prune(h[0..32])
//! child  = pubkey + f * B,  chain_code' = h[32..64]
//! ```
//!
//! Only the public derivation path is available here; there are no secret
//! keys anywhere in the adapter.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::trace;
use vapor_types::NetParams;

use crate::address::p2wpkh_address;
use crate::error::DerivationError;
use crate::hash::ripemd160;

type HmacSha512 = Hmac<Sha512>;

/// BIP-44 purpose segment.
pub const PURPOSE: u32 = 44;
/// Registered coin type for the Vapor sidechain.
pub const COIN_TYPE: u32 = 153;
/// Account and address index used for single-key address derivation.
pub const DEFAULT_ACCOUNT: u32 = 1;
pub const DEFAULT_ADDRESS_INDEX: u32 = 1;

/// Length of a hex-encoded xpub.
pub const XPUB_HEX_LEN: usize = 128;

/// One step of a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildNumber {
    pub index: u32,
    pub hardened: bool,
}

impl ChildNumber {
    pub fn normal(index: u32) -> Self {
        Self {
            index,
            hardened: false,
        }
    }

    pub fn hardened(index: u32) -> Self {
        Self {
            index,
            hardened: true,
        }
    }

    /// Selector bytes fed into the HMAC: the index as 4 little-endian bytes.
    fn selector(&self) -> [u8; 4] {
        self.index.to_le_bytes()
    }
}

/// Ordered list of child steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn new(steps: Vec<ChildNumber>) -> Self {
        Self(steps)
    }

    /// `44 / 153 / account / change / address_index`, all non-hardened.
    pub fn for_address(account: u32, address_index: u32, change: bool) -> Self {
        Self(vec![
            ChildNumber::normal(PURPOSE),
            ChildNumber::normal(COIN_TYPE),
            ChildNumber::normal(account),
            ChildNumber::normal(u32::from(change)),
            ChildNumber::normal(address_index),
        ])
    }

    pub fn steps(&self) -> &[ChildNumber] {
        &self.0
    }
}

/// Extended public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct XPub([u8; 64]);

impl XPub {
    /// Parse a 128-character hex xpub and check the public key is a
    /// canonically encoded curve point.
    pub fn from_hex(s: &str) -> Result<Self, DerivationError> {
        if s.len() != XPUB_HEX_LEN {
            return Err(DerivationError::BadLength(s.len()));
        }
        let mut bytes = [0u8; 64];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| DerivationError::InvalidHex(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: [u8; 64]) -> Result<Self, DerivationError> {
        let xpub = Self(bytes);
        xpub.point()?;
        Ok(xpub)
    }

    pub fn public_key(&self) -> [u8; 32] {
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&self.0[..32]);
        pk
    }

    pub fn chain_code(&self) -> [u8; 32] {
        let mut cc = [0u8; 32];
        cc.copy_from_slice(&self.0[32..]);
        cc
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    fn point(&self) -> Result<EdwardsPoint, DerivationError> {
        let compressed = CompressedEdwardsY(self.public_key());
        let point = compressed.decompress().ok_or(DerivationError::InvalidPoint)?;
        // Non-canonical y (>= p) decodes leniently; reject it.
        if point.compress() != compressed {
            return Err(DerivationError::InvalidPoint);
        }
        Ok(point)
    }

    /// Derive one non-hardened child.
    pub fn child(&self, number: ChildNumber) -> Result<XPub, DerivationError> {
        if number.hardened {
            return Err(DerivationError::HardenedFromPublic(number.index));
        }

        let mut mac = HmacSha512::new_from_slice(&self.0[32..])
            .map_err(|e| DerivationError::DerivationFailed(e.to_string()))?;
        mac.update(b"N");
        mac.update(&self.0[..32]);
        mac.update(&number.selector());
        let h = mac.finalize().into_bytes();

        let mut f = [0u8; 32];
        f.copy_from_slice(&h[..32]);
        prune_intermediate_scalar(&mut f);

        let child_point = self.point()? + EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(f));

        let mut out = [0u8; 64];
        out[..32].copy_from_slice(child_point.compress().as_bytes());
        out[32..].copy_from_slice(&h[32..]);
        Ok(XPub(out))
    }

    /// Walk every step of the path.
    pub fn derive(&self, path: &DerivationPath) -> Result<XPub, DerivationError> {
        path.steps()
            .iter()
            .try_fold(*self, |xpub, step| xpub.child(*step))
    }
}

impl std::fmt::Debug for XPub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XPub({})", hex::encode(&self.0[..8]))
    }
}

impl std::fmt::Display for XPub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Clamp to a multiple of 8 below 2^233.
fn prune_intermediate_scalar(f: &mut [u8; 32]) {
    f[0] &= 248;
    f[29] &= 1;
    f[30] = 0;
    f[31] = 0;
}

/// P2WPKH address of the key at `44/153/1/0/1` below the given xpub.
pub fn derive_address(xpub_hex: &str, params: &NetParams) -> Result<String, DerivationError> {
    let xpub = XPub::from_hex(xpub_hex)?;
    let path = DerivationPath::for_address(DEFAULT_ACCOUNT, DEFAULT_ADDRESS_INDEX, false);
    let child = xpub.derive(&path)?;
    let pubkey_hash = ripemd160(&child.public_key());
    let address = p2wpkh_address(&pubkey_hash, params)?;
    trace!(address = %address, "derived address from xpub");
    Ok(address)
}
