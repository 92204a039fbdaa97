//! # Signed-Message Verification Benchmarks
//!
//! ```bash
//! cargo bench --package signed-message-verification --bench verification
//! ```
//!
//! | Group          | Covers                                        |
//! |----------------|-----------------------------------------------|
//! | canonicalize   | compact-size prefixing and double SHA-256     |
//! | verify/address | full address path, valid and wrong message    |
//! | verify/pubkey  | direct comparison vs. serialization fallback  |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use signed_message_verification::domain::ecdsa::parse_public_key;
use signed_message_verification::{
    canonicalize, NetworkParams, SignedMessageVerificationApi, SignedMessageVerifier,
};
use std::time::Duration;

const ADDRESS: &str = "194vDb9xwY6XQi5bLa7FRPBewJdUqympZ9";
const MESSAGE: &str = "Hello, Bitcoin testing!";
const SIGNATURE: &str =
    "IOeVH/0KqgmS3XKwqCJiwlcHonwxKMQN6fbOW5UsXSDZB4EGCVTXx6c+ZU/Ae5qO94MSBZn2aPOiUsupRIwBaAU=";
const PUBKEY: &str = "034fafbb0673368ea3dcc7003a753c51bf240471c3a1b811491ba9f3480091e23c";

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");

    for size in [16usize, 252, 253, 4096, 65_536] {
        let message = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, m| {
            b.iter(|| canonicalize(black_box(m)));
        });
    }

    group.finish();
}

fn bench_verify_by_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify/address");
    group.measurement_time(Duration::from_secs(10));

    let verifier = SignedMessageVerifier::default();
    let net = NetworkParams::mainnet();

    group.bench_function("valid_p2pkh", |b| {
        b.iter(|| {
            verifier.verify_by_address(
                black_box(ADDRESS),
                black_box(MESSAGE),
                black_box(SIGNATURE),
                &net,
            )
        });
    });

    group.bench_function("wrong_message", |b| {
        b.iter(|| {
            verifier.verify_by_address(
                black_box(ADDRESS),
                black_box("Hello, Bitcoin testing?"),
                black_box(SIGNATURE),
                &net,
            )
        });
    });

    group.finish();
}

fn bench_verify_by_public_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify/pubkey");
    group.measurement_time(Duration::from_secs(10));

    let verifier = SignedMessageVerifier::default();
    let net = NetworkParams::mainnet();
    let compressed = hex::decode(PUBKEY).unwrap();

    group.bench_function("direct", |b| {
        b.iter(|| verifier.verify_by_public_key(black_box(&compressed), MESSAGE, SIGNATURE, &net));
    });

    let uncompressed = parse_public_key(&compressed)
        .unwrap()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();

    group.bench_function("serialization_fallback", |b| {
        b.iter(|| {
            verifier.verify_by_public_key(black_box(&uncompressed), MESSAGE, SIGNATURE, &net)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_verify_by_address,
    bench_verify_by_public_key
);
criterion_main!(benches);
