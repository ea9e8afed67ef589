use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vapor_types::network::TESTNET;

const XPUB: &str = "1c0c2c75073c438b5612005bacdcbde2352277c44a22c5a31aa35899a3369e5fe61bb70eee5c0de48bcefddca59b14162e411b5f11d1966661a25491d48fcdbf";

fn derive_address_bench(c: &mut Criterion) {
    c.bench_function("derive_address_44_153_1_0_1", |b| {
        b.iter(|| vapor_crypto::derive_address(black_box(XPUB), &TESTNET))
    });
}

fn xpub_child_bench(c: &mut Criterion) {
    let xpub = vapor_crypto::XPub::from_hex(XPUB).unwrap();

    c.bench_function("xpub_child", |b| {
        b.iter(|| xpub.child(black_box(vapor_crypto::ChildNumber::normal(7))))
    });
}

fn sha3_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("sha3_256_256B", |b| {
        b.iter(|| vapor_crypto::sha3_256(black_box(&data)))
    });
}

fn sha3_multi_bench(c: &mut Criterion) {
    let parts: Vec<&[u8]> = vec![b"entryid:", b"spend1", b":", &[3u8; 32]];

    c.bench_function("sha3_256_multi_entry_id", |b| {
        b.iter(|| vapor_crypto::sha3_256_multi(black_box(&parts)))
    });
}

fn bech32_encode_bench(c: &mut Criterion) {
    let hash = [0x42u8; 20];

    c.bench_function("p2wpkh_address", |b| {
        b.iter(|| vapor_crypto::p2wpkh_address(black_box(&hash), &TESTNET))
    });
}

criterion_group!(
    benches,
    derive_address_bench,
    xpub_child_bench,
    sha3_256_bench,
    sha3_multi_bench,
    bech32_encode_bench,
);
criterion_main!(benches);
