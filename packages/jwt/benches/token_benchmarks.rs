//! Issue and verify throughput for HS256 tokens

use criterion::{Criterion, criterion_group, criterion_main};
use jwt_credentials::{IssueOptions, SigningKey, TokenService};
use serde_json::json;
use std::hint::black_box;
use std::time::Duration;

/// Benchmark issuing, decoding and validating a token
fn benchmark_token_operations(c: &mut Criterion) {
    let service = TokenService::from_key(
        SigningKey::from_bytes(vec![0x11; 32]),
        Duration::from_secs(3600),
    );
    let mut group = c.benchmark_group("hs256_tokens");

    group.bench_function("issue", |b| {
        b.iter(|| {
            let token = service
                .issue(
                    black_box("alice"),
                    IssueOptions::new().with_claim("role", json!("admin")),
                )
                .expect("issue should succeed");
            black_box(token);
        });
    });

    let token = service.issue_default("alice").expect("issue should succeed");

    group.bench_function("decode", |b| {
        b.iter(|| {
            let claims = service
                .extract_all_claims(black_box(token.as_str()))
                .expect("decode should succeed");
            black_box(claims);
        });
    });

    group.bench_function("is_valid", |b| {
        b.iter(|| black_box(service.accepts(black_box(token.as_str()), "alice")));
    });

    group.finish();
}

criterion_group!(benches, benchmark_token_operations);
criterion_main!(benches);
