//! Raw transaction to [`NormalizedTx`].

use tracing::{debug, trace};
use vapor_crypto::EncodeError;
use vapor_types::{NetParams, NormalizedTx, TokenRegistry, Utxo, SMART_CONTRACT};

use crate::error::DecodeError;
use crate::script::{is_p2w_script, script_to_address};
use crate::tx::{Tx, TxInput, TxOutput, TypedInput, TypedOutput};

/// Decodes transactions for one network against one token table.
///
/// Entries whose asset is not in the registry are left out of the result.
/// Address rendering happens before that filter, so a control program that
/// cannot be rendered fails the whole decode even on an unknown asset.
#[derive(Debug, Clone, Copy)]
pub struct TxDecoder<'a> {
    params: &'a NetParams,
    registry: &'a TokenRegistry,
}

impl<'a> TxDecoder<'a> {
    pub fn new(params: &'a NetParams, registry: &'a TokenRegistry) -> Self {
        Self { params, registry }
    }

    pub fn params(&self) -> &'a NetParams {
        self.params
    }

    pub fn registry(&self) -> &'a TokenRegistry {
        self.registry
    }

    pub fn decode(&self, raw_hex: &str) -> Result<NormalizedTx, DecodeError> {
        let tx = Tx::from_hex(raw_hex)?;
        let normalized = self.normalize(&tx)?;
        debug!(
            tx_hash = normalized.hash.as_deref().unwrap_or_default(),
            inputs = normalized.inputs.len(),
            outputs = normalized.outputs.len(),
            "decoded transaction"
        );
        Ok(normalized)
    }

    /// Id of the decoded transaction, without normalizing it.
    pub fn unsigned_hash(&self, raw_hex: &str) -> Result<String, DecodeError> {
        Ok(Tx::from_hex(raw_hex)?.id().to_string())
    }

    pub fn normalize(&self, tx: &Tx) -> Result<NormalizedTx, DecodeError> {
        let mut inputs = Vec::with_capacity(tx.inputs.len());
        for input in &tx.inputs {
            let address = self.input_address(input)?;
            let value = input.asset_amount();
            if let Some(utxo) = self.utxo(address, value.amount, &value.asset_id.to_string()) {
                inputs.push(utxo);
            }
        }

        let mut outputs = Vec::with_capacity(tx.outputs.len());
        for output in &tx.outputs {
            let address = self.output_address(output)?;
            let value = output.asset_amount();
            if let Some(utxo) = self.utxo(address, value.amount, &value.asset_id.to_string()) {
                outputs.push(utxo);
            }
        }

        Ok(NormalizedTx {
            hash: Some(tx.id().to_string()),
            inputs,
            outputs,
            ..NormalizedTx::default()
        })
    }

    fn utxo(&self, address: String, value: u64, asset_id: &str) -> Option<Utxo> {
        let utxo = Utxo::from_registry(self.registry, address, value, asset_id);
        if utxo.is_none() {
            trace!(asset_id, "skipping unregistered asset");
        }
        utxo
    }

    fn input_address(&self, input: &TxInput) -> Result<String, EncodeError> {
        match &input.typed {
            TypedInput::Spend { commitment, .. } => {
                if !is_p2w_script(&commitment.control_program) {
                    return Ok(SMART_CONTRACT.to_string());
                }
                script_to_address(&commitment.control_program, self.params)
            }
            TypedInput::Veto { commitment, .. } => {
                script_to_address(&commitment.control_program, self.params)
            }
            TypedInput::CrossChain { .. } | TypedInput::Coinbase { .. } => Ok(String::new()),
        }
    }

    fn output_address(&self, output: &TxOutput) -> Result<String, EncodeError> {
        match &output.typed {
            TypedOutput::CrossChain(commitment) => {
                let asset_id = commitment.asset_amount.asset_id.to_string();
                if self.registry.is_bridged(&asset_id) {
                    Ok(format!("0x{}", hex::encode(&commitment.control_program)))
                } else {
                    Ok(String::new())
                }
            }
            TypedOutput::IntraChain(commitment) | TypedOutput::Vote { commitment, .. } => {
                script_to_address(&commitment.control_program, self.params)
            }
        }
    }
}
