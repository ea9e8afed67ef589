//! Helpers for building raw transactions in tests.

use vapor_types::AssetId;

use crate::encoding::Writer;
use crate::tx::{ASSET_VERSION, SERFLAGS_REQUIRED, VM_VERSION};

/// Unsigned testnet transaction: one BTM spend, two BTM outputs.
pub const FIXTURE_HEX: &str = "07010001016401628a9415d9ed4bce588b7bdb0208ccf7ed93cdf96266678eaf7e5b9545340bb362ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f000116001403a7ab809e80f1d26bcae51c05d3ea01d1bdd3b401000201430041ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffbda8d0ffffffff7f0116001483a69a4dfc19f489aa8aa3d33c5493871d41dc5d00013e003cffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff80c2d72f01160014d9456c6c541e2ef2ea0b00732176ad1d97b1871400";

pub const FIXTURE_TX_ID: &str = "9160936f300c7b0e3eba18647963fbc8672cd65f0eaec799b6adb100e996e6a3";

/// P2WPKH control program for a 20-byte hash.
pub fn p2wpkh_program(hash: [u8; 20]) -> Vec<u8> {
    let mut prog = vec![0x00, 0x14];
    prog.extend_from_slice(&hash);
    prog
}

/// P2WSH control program for a 32-byte hash.
pub fn p2wsh_program(hash: [u8; 32]) -> Vec<u8> {
    let mut prog = vec![0x00, 0x20];
    prog.extend_from_slice(&hash);
    prog
}

/// Assembles a transaction one input/output at a time.
pub struct TxBuilder {
    version: u64,
    time_range: u64,
    asset_version: u64,
    vm_version: u64,
    inputs: Vec<Vec<u8>>,
    outputs: Vec<Vec<u8>>,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    pub fn new() -> Self {
        Self {
            version: 1,
            time_range: 0,
            asset_version: ASSET_VERSION,
            vm_version: VM_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn time_range(mut self, time_range: u64) -> Self {
        self.time_range = time_range;
        self
    }

    /// Asset version written for every following input and output.
    pub fn asset_version(mut self, v: u64) -> Self {
        self.asset_version = v;
        self
    }

    /// VM version written into every following commitment.
    pub fn vm_version(mut self, v: u64) -> Self {
        self.vm_version = v;
        self
    }

    pub fn spend(self, source_id: [u8; 32], asset: AssetId, amount: u64, program: &[u8]) -> Self {
        let vm = self.vm_version;
        self.input(1, true, |w| {
            write_spend_commitment(w, source_id, asset, amount, vm, program)
        })
    }

    pub fn veto(
        self,
        source_id: [u8; 32],
        asset: AssetId,
        amount: u64,
        program: &[u8],
        vote: &[u8],
    ) -> Self {
        let vm = self.vm_version;
        self.input(3, true, |w| {
            write_spend_commitment(w, source_id, asset, amount, vm, program);
            w.write_varstr31(vote);
        })
    }

    pub fn cross_chain_input(
        self,
        source_id: [u8; 32],
        asset: AssetId,
        amount: u64,
        program: &[u8],
        asset_definition: &[u8],
        issuance_program: &[u8],
    ) -> Self {
        let vm = self.vm_version;
        self.input(0, true, |w| {
            write_spend_commitment(w, source_id, asset, amount, vm, program);
            w.write_uvarint(vm)
                .write_varstr31(asset_definition)
                .write_varstr31(issuance_program);
        })
    }

    pub fn coinbase(self, arbitrary: &[u8]) -> Self {
        self.input(2, false, |w| {
            w.write_varstr31(arbitrary);
        })
    }

    /// An input whose commitment holds only the given type byte.
    pub fn raw_input_type(self, input_type: u8) -> Self {
        self.input(input_type, true, |_| {})
    }

    pub fn intra_chain_output(self, asset: AssetId, amount: u64, program: &[u8]) -> Self {
        self.output(0, None, asset, amount, program)
    }

    pub fn cross_chain_output(self, asset: AssetId, amount: u64, program: &[u8]) -> Self {
        self.output(1, None, asset, amount, program)
    }

    pub fn vote_output(self, asset: AssetId, amount: u64, program: &[u8], vote: &[u8]) -> Self {
        self.output(2, Some(vote), asset, amount, program)
    }

    /// An output whose commitment holds only the given type byte.
    pub fn raw_output_type(mut self, output_type: u8) -> Self {
        let mut w = Writer::new();
        w.write_uvarint(self.asset_version);
        w.write_extensible(|w| {
            w.write_byte(output_type);
        });
        w.write_varstr31(&[]);
        self.outputs.push(w.into_bytes());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_byte(SERFLAGS_REQUIRED)
            .write_uvarint(self.version)
            .write_uvarint(self.time_range)
            .write_uvarint(self.inputs.len() as u64);
        for input in &self.inputs {
            w.write_bytes(input);
        }
        w.write_uvarint(self.outputs.len() as u64);
        for output in &self.outputs {
            w.write_bytes(output);
        }
        w.into_bytes()
    }

    pub fn build_hex(&self) -> String {
        hex::encode(self.build())
    }

    fn input(mut self, input_type: u8, with_arguments: bool, body: impl FnOnce(&mut Writer)) -> Self {
        let mut w = Writer::new();
        w.write_uvarint(self.asset_version);
        w.write_extensible(|w| {
            w.write_byte(input_type);
            body(w);
        });
        w.write_extensible(|w| {
            if with_arguments {
                w.write_varstr_list(&[]);
            }
        });
        self.inputs.push(w.into_bytes());
        self
    }

    fn output(
        mut self,
        output_type: u8,
        vote: Option<&[u8]>,
        asset: AssetId,
        amount: u64,
        program: &[u8],
    ) -> Self {
        let vm = self.vm_version;
        let mut w = Writer::new();
        w.write_uvarint(self.asset_version);
        w.write_extensible(|w| {
            w.write_byte(output_type);
            if let Some(vote) = vote {
                w.write_varstr31(vote);
            }
            w.write_extensible(|w| {
                w.write_bytes(asset.as_bytes())
                    .write_uvarint(amount)
                    .write_uvarint(vm)
                    .write_varstr31(program);
            });
        });
        w.write_varstr31(&[]);
        self.outputs.push(w.into_bytes());
        self
    }
}

fn write_spend_commitment(
    w: &mut Writer,
    source_id: [u8; 32],
    asset: AssetId,
    amount: u64,
    vm: u64,
    program: &[u8],
) {
    w.write_extensible(|w| {
        w.write_bytes(&source_id)
            .write_bytes(asset.as_bytes())
            .write_uvarint(amount)
            .write_uvarint(0)
            .write_uvarint(vm)
            .write_varstr31(program);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_reproduces_fixture() {
        let source =
            hex::decode("8a9415d9ed4bce588b7bdb0208ccf7ed93cdf96266678eaf7e5b9545340bb362").unwrap();
        let mut source_id = [0u8; 32];
        source_id.copy_from_slice(&source);

        let hex = TxBuilder::new()
            .spend(
                source_id,
                AssetId::NATIVE,
                i64::MAX as u64,
                &hex::decode("001403a7ab809e80f1d26bcae51c05d3ea01d1bdd3b4").unwrap(),
            )
            .intra_chain_output(
                AssetId::NATIVE,
                9_223_372_036_754_775_807,
                &hex::decode("001483a69a4dfc19f489aa8aa3d33c5493871d41dc5d").unwrap(),
            )
            .intra_chain_output(
                AssetId::NATIVE,
                100_000_000,
                &hex::decode("0014d9456c6c541e2ef2ea0b00732176ad1d97b18714").unwrap(),
            )
            .build_hex();
        assert_eq!(hex, FIXTURE_HEX);
    }
}
