//! edwards25519 and Ed25519 benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hex_literal::hex;
use p2pcrypto_edwards25519::{EdwardsPoint, FieldElement, Scalar, SigningKey, init_tables};

const SEED: [u8; 32] = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");

fn test_scalar() -> Scalar {
    Scalar::from_bytes_mod_order(&hex!(
        "b1a2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f09"
    ))
}

fn bench_field(c: &mut Criterion) {
    let x = FieldElement::from_bytes(&SEED);
    let y = x.square();

    let mut group = c.benchmark_group("field element operations");
    group.bench_function("mul", |b| b.iter(|| black_box(x).mul(&black_box(y))));
    group.bench_function("square", |b| b.iter(|| black_box(x).square()));
    group.bench_function("invert", |b| b.iter(|| black_box(x).invert()));
    group.bench_function("sqrt_ratio", |b| {
        b.iter(|| FieldElement::sqrt_ratio(&black_box(x), &black_box(y)))
    });
    group.finish();
}

fn bench_point(c: &mut Criterion) {
    init_tables();
    let k = test_scalar();
    let p = EdwardsPoint::scalar_base_mult(&k);

    let mut group = c.benchmark_group("point operations");
    group.bench_function("scalar_mult", |b| b.iter(|| black_box(p).scalar_mult(&black_box(k))));
    group.bench_function("scalar_base_mult", |b| {
        b.iter(|| EdwardsPoint::scalar_base_mult(&black_box(k)))
    });
    group.bench_function("var_time_double_scalar_base_mult", |b| {
        b.iter(|| EdwardsPoint::var_time_double_scalar_base_mult(&black_box(k), &p, &k))
    });
    group.bench_function("from_bytes", |b| {
        let bytes = p.to_bytes();
        b.iter(|| EdwardsPoint::from_bytes(black_box(&bytes)))
    });
    group.finish();
}

fn bench_ed25519(c: &mut Criterion) {
    init_tables();
    let key = SigningKey::from_seed(&SEED);
    let public = key.verifying_key();
    let sig = key.sign(b"benchmark message");

    let mut group = c.benchmark_group("ed25519");
    group.bench_function("from_seed", |b| b.iter(|| SigningKey::from_seed(black_box(&SEED))));
    group.bench_function("sign", |b| b.iter(|| key.sign(black_box(b"benchmark message"))));
    group.bench_function("verify", |b| {
        b.iter(|| public.verify(black_box(b"benchmark message"), black_box(&sig)))
    });
    group.finish();
}

criterion_group!(benches, bench_field, bench_point, bench_ed25519);
criterion_main!(benches);
