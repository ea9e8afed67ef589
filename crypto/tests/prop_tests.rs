use proptest::prelude::*;

use vapor_crypto::{decode_address, derive_address, p2wpkh_address, p2wsh_address, validate_address, XPub};
use vapor_types::network::{MAINNET, SOLONET, TESTNET};
use vapor_types::{NetParams, WitnessProgram};

const XPUB: &str = "1c0c2c75073c438b5612005bacdcbde2352277c44a22c5a31aa35899a3369e5fe61bb70eee5c0de48bcefddca59b14162e411b5f11d1966661a25491d48fcdbf";

fn any_network() -> impl Strategy<Value = &'static NetParams> {
    prop_oneof![Just(&MAINNET), Just(&TESTNET), Just(&SOLONET)]
}

proptest! {
    #[test]
    fn p2wpkh_round_trips(hash in any::<[u8; 20]>(), params in any_network()) {
        let address = p2wpkh_address(&hash, params).unwrap();
        prop_assert_eq!(address.len(), 42);
        prop_assert_eq!(decode_address(&address, params).unwrap(), WitnessProgram::PubKeyHash(hash));
    }

    #[test]
    fn p2wsh_round_trips(hash in any::<[u8; 32]>(), params in any_network()) {
        let address = p2wsh_address(&hash, params).unwrap();
        prop_assert_eq!(address.len(), 62);
        prop_assert_eq!(decode_address(&address, params).unwrap(), WitnessProgram::ScriptHash(hash));
    }

    #[test]
    fn address_is_bound_to_its_network(hash in any::<[u8; 20]>()) {
        let address = p2wpkh_address(&hash, &MAINNET).unwrap();
        prop_assert!(validate_address(&address, &MAINNET));
        prop_assert!(!validate_address(&address, &TESTNET));
        prop_assert!(!validate_address(&address, &SOLONET));
    }

    #[test]
    fn wrong_payload_lengths_rejected(len in 0usize..64) {
        prop_assume!(len != 20);
        let payload = vec![7u8; len];
        prop_assert!(p2wpkh_address(&payload, &TESTNET).is_err());
    }

    #[test]
    fn child_derivation_is_deterministic(index in 0u32..0x8000_0000) {
        let xpub = XPub::from_hex(XPUB).unwrap();
        let a = xpub.child(vapor_crypto::ChildNumber::normal(index)).unwrap();
        let b = xpub.child(vapor_crypto::ChildNumber::normal(index)).unwrap();
        prop_assert_eq!(a.as_bytes(), b.as_bytes());
        // A derived child is itself a valid xpub.
        prop_assert!(XPub::from_hex(&hex::encode(a.as_bytes())).is_ok());
    }

    #[test]
    fn derive_address_never_panics(s in "[0-9a-f]{0,130}") {
        let _ = derive_address(&s, &TESTNET);
    }
}
