#![no_main]

use libfuzzer_sys::fuzz_target;
use vapor_crypto::{decode_address, encode_address};
use vapor_types::network::{MAINNET, SOLONET, TESTNET};

// Any accepted address re-encodes to an address carrying the same program.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    for params in [&MAINNET, &TESTNET, &SOLONET] {
        if let Ok(program) = decode_address(s, params) {
            let encoded = encode_address(&program, params).expect("decoded program must encode");
            assert_eq!(decode_address(&encoded, params).ok(), Some(program));
        }
    }
});
