//! Benchmarks for the registry resolve path and the full gateway decision
//! path, both under contention from multiple keys.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tenant_ratelimit::algorithm::AlgorithmKind;
use tenant_ratelimit::config::RateLimitConfig;
use tenant_ratelimit::registry::LimiterRegistry;

fn bench_registry_get_or_create(c: &mut Criterion) {
    let registry = LimiterRegistry::new();
    let configs: Vec<_> = (0..64)
        .map(|i| RateLimitConfig::new(format!("key-{i}"), AlgorithmKind::TokenBucket, 1_000, 60.0))
        .collect();

    let mut i = 0usize;
    c.bench_function("registry_get_or_create_resolve", |b| {
        b.iter(|| {
            let config = &configs[i % configs.len()];
            i += 1;
            black_box(registry.get_or_create(&config.api_key, Some(config), 0.0));
        })
    });
}

fn bench_gateway_decide(c: &mut Criterion) {
    use tenant_ratelimit::analytics::Analytics;
    use tenant_ratelimit::apikey::ApiKeyRecord;
    use tenant_ratelimit::clock::SystemClock;
    use tenant_ratelimit::gateway::Gateway;
    use tenant_ratelimit::store::{ConfigStore, InMemoryStore};

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let record = ApiKeyRecord::new("acme".into());
    runtime.block_on(store.put_api_key(record.clone())).unwrap();
    runtime
        .block_on(store.put_config(RateLimitConfig::new(
            record.api_key.clone(),
            AlgorithmKind::TokenBucket,
            1_000_000,
            60.0,
        )))
        .unwrap();

    let gateway = Gateway::new(store, Arc::new(Analytics::new()), Arc::new(SystemClock::new()));

    c.bench_function("gateway_decide", |b| {
        b.iter(|| {
            runtime.block_on(async { black_box(gateway.decide(&record.api_key, "/protected/test").await.unwrap()) });
        })
    });
}

criterion_group!(benches, bench_registry_get_or_create, bench_gateway_decide);
criterion_main!(benches);
