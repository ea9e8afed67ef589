//! Transaction ids.
//!
//! A transaction maps to a graph of typed entries (spends, a mux, outputs, a
//! header). Each entry id is
//!
//! ```text
//! SHA3-256("entryid:" || type || ":" || SHA3-256(body))
//! ```
//!
//! and the transaction id is the id of its header entry. Bodies use u64
//! little-endian integers, raw 32-byte hashes, `varstr31` byte strings and
//! varint-counted lists.

use vapor_crypto::{sha3_256, sha3_256_multi};
use vapor_types::Hash;

use crate::encoding::Writer;
use crate::program::{OP_FAIL, OP_TRUE};
use crate::tx::{AssetAmount, SpendCommitment, Tx, TypedInput, TypedOutput, VM_VERSION};

const SPEND: &str = "spend1";
const VETO: &str = "vetoInput1";
const CROSS_CHAIN_INPUT: &str = "crosschaininput1";
const COINBASE: &str = "coinbase1";
const MUX: &str = "mux1";
const INTRA_CHAIN_OUTPUT: &str = "intrachainoutput1";
const CROSS_CHAIN_OUTPUT: &str = "crosschainoutput1";
const VOTE_OUTPUT: &str = "voteoutput1";
const RETIREMENT: &str = "retirement1";
const TX_HEADER: &str = "txheader";

/// Where a value comes from: entry `reference`, slot `position`.
#[derive(Debug, Clone, Copy)]
struct ValueSource {
    reference: Hash,
    value: AssetAmount,
    position: u64,
}

impl ValueSource {
    fn write(&self, w: &mut Writer) {
        w.write_bytes(self.reference.as_bytes());
        write_asset_amount(w, &self.value);
        w.write_u64_le(self.position);
    }
}

fn write_asset_amount(w: &mut Writer, value: &AssetAmount) {
    w.write_bytes(value.asset_id.as_bytes());
    w.write_u64_le(value.amount);
}

fn write_program(w: &mut Writer, vm_version: u64, code: &[u8]) {
    w.write_u64_le(vm_version);
    w.write_varstr31(code);
}

/// Id of an entry with the given type string and body.
pub fn entry_id(entry_type: &str, body: &[u8]) -> Hash {
    let body_hash = sha3_256(body);
    Hash::new(sha3_256_multi(&[
        b"entryid:",
        entry_type.as_bytes(),
        b":",
        &body_hash,
    ]))
}

fn hash_entry(entry_type: &str, body: impl FnOnce(&mut Writer)) -> Hash {
    let mut w = Writer::new();
    body(&mut w);
    entry_id(entry_type, w.as_slice())
}

/// Output entry that a spend-like input consumes.
fn prevout_id(commitment: &SpendCommitment, entry_type: &str, vote: Option<&[u8]>) -> Hash {
    let source = ValueSource {
        reference: commitment.source_id,
        value: commitment.asset_amount,
        position: commitment.source_position,
    };
    hash_entry(entry_type, |w| {
        source.write(w);
        write_program(w, commitment.vm_version, &commitment.control_program);
        if let Some(vote) = vote {
            w.write_varstr31(vote);
        }
    })
}

/// Input entry id and the value it contributes to the mux.
fn input_source(tx: &Tx, input: &TypedInput) -> ValueSource {
    match input {
        TypedInput::Spend { commitment, .. } => {
            let prevout = prevout_id(commitment, INTRA_CHAIN_OUTPUT, None);
            let id = hash_entry(SPEND, |w| {
                w.write_bytes(prevout.as_bytes());
            });
            mux_source(id, commitment.asset_amount)
        }
        TypedInput::Veto {
            commitment, vote, ..
        } => {
            let prevout = prevout_id(commitment, VOTE_OUTPUT, Some(vote.as_slice()));
            let id = hash_entry(VETO, |w| {
                w.write_bytes(prevout.as_bytes());
            });
            mux_source(id, commitment.asset_amount)
        }
        TypedInput::CrossChain {
            commitment,
            issuance_vm_version,
            asset_definition,
            issuance_program,
            ..
        } => {
            let mainchain_output = prevout_id(commitment, INTRA_CHAIN_OUTPUT, None);
            let definition_hash = sha3_256(asset_definition);
            let id = hash_entry(CROSS_CHAIN_INPUT, |w| {
                w.write_bytes(mainchain_output.as_bytes());
                write_program(w, *issuance_vm_version, issuance_program);
                w.write_bytes(&definition_hash);
            });
            mux_source(id, commitment.asset_amount)
        }
        TypedInput::Coinbase { arbitrary } => {
            let id = hash_entry(COINBASE, |w| {
                w.write_varstr31(arbitrary);
            });
            // Coinbase value is whatever the first output claims.
            let value = tx
                .outputs
                .first()
                .map(|o| o.asset_amount())
                .unwrap_or_default();
            mux_source(id, value)
        }
    }
}

fn mux_source(reference: Hash, value: AssetAmount) -> ValueSource {
    ValueSource {
        reference,
        value,
        position: 0,
    }
}

/// Compute the transaction id.
pub fn tx_id(tx: &Tx) -> Hash {
    let sources: Vec<ValueSource> = tx
        .inputs
        .iter()
        .map(|input| input_source(tx, &input.typed))
        .collect();

    let mux = hash_entry(MUX, |w| {
        w.write_uvarint(sources.len() as u64);
        for source in &sources {
            source.write(w);
        }
        write_program(w, VM_VERSION, &[OP_TRUE]);
    });

    let results: Vec<Hash> = tx
        .outputs
        .iter()
        .enumerate()
        .map(|(i, output)| {
            let commitment = output.commitment();
            let source = ValueSource {
                reference: mux,
                value: commitment.asset_amount,
                position: i as u64,
            };

            if commitment.control_program.first() == Some(&OP_FAIL) {
                return hash_entry(RETIREMENT, |w| source.write(w));
            }

            let (entry_type, vote) = match &output.typed {
                TypedOutput::IntraChain(_) => (INTRA_CHAIN_OUTPUT, None),
                TypedOutput::CrossChain(_) => (CROSS_CHAIN_OUTPUT, None),
                TypedOutput::Vote { vote, .. } => (VOTE_OUTPUT, Some(vote.as_slice())),
            };
            hash_entry(entry_type, |w| {
                source.write(w);
                write_program(w, commitment.vm_version, &commitment.control_program);
                if let Some(vote) = vote {
                    w.write_varstr31(vote);
                }
            })
        })
        .collect();

    hash_entry(TX_HEADER, |w| {
        w.write_u64_le(tx.version);
        w.write_u64_le(tx.time_range);
        w.write_uvarint(results.len() as u64);
        for id in &results {
            w.write_bytes(id.as_bytes());
        }
    })
}

impl Tx {
    /// The canonical transaction id (header entry id).
    pub fn id(&self) -> Hash {
        tx_id(self)
    }
}
