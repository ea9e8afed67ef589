#![no_main]

use libfuzzer_sys::fuzz_target;
use vapor_transactions::{Tx, TxDecoder};
use vapor_types::network::MAINNET;
use vapor_types::TokenRegistry;

// Arbitrary bytes must never panic the parser, the id computation or the
// normalizer. Any parsed transaction must also parse from its hex form.
fuzz_target!(|data: &[u8]| {
    let Ok(tx) = Tx::from_bytes(data) else {
        return;
    };
    let id = tx.id();

    let registry = TokenRegistry::reference();
    let decoder = TxDecoder::new(&MAINNET, &registry);
    let _ = decoder.normalize(&tx);

    let raw_hex = hex::encode(data);
    let hash = decoder
        .unsigned_hash(&raw_hex)
        .expect("hex form of a parsed transaction must parse");
    assert_eq!(hash, id.to_string());

    if let Ok(normalized) = decoder.decode(&raw_hex) {
        assert!(normalized.inputs.len() <= tx.inputs.len());
        assert!(normalized.outputs.len() <= tx.outputs.len());
    }
});
