//! secp256k1 ECDSA benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hex_literal::hex;
use p2pcrypto_secp256k1::{SecretKey, ecdsa::{Signature, recover_compact}};

const SECRET: [u8; 32] = hex!("519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464");
const HASH: [u8; 32] = hex!("5aaf9e7f2a1c1d0e4f4a4f8d40f8a5d4e6a7e3d1c5b8a79f6e5d4c3b2a190807");

fn bench_ecdsa(c: &mut Criterion) {
    let secret = SecretKey::from_bytes(&SECRET).unwrap();
    let public = secret.public_key();
    let signature = secret.sign(&HASH);
    let der = signature.to_der();
    let compact = secret.sign_compact(&HASH, true);

    let mut group = c.benchmark_group("ecdsa");
    group.bench_function("sign", |b| b.iter(|| secret.sign(black_box(&HASH))));
    group.bench_function("verify", |b| {
        b.iter(|| signature.verify(black_box(&HASH), black_box(&public)))
    });
    group.bench_function("parse der", |b| {
        b.iter(|| Signature::from_der(black_box(der.as_ref())))
    });
    group.bench_function("recover compact", |b| {
        b.iter(|| recover_compact(black_box(&compact), black_box(&HASH)))
    });
    group.bench_function("public key", |b| b.iter(|| black_box(&secret).public_key()));
    group.finish();
}

criterion_group!(benches, bench_ecdsa);
criterion_main!(benches);
