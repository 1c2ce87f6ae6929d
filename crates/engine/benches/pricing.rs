use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_engine::{solve, EngineConfig, OptionKind, PricingRequest};

fn request(option_type: OptionKind, maturity: f64) -> PricingRequest {
    PricingRequest {
        option_type,
        strike: 100.0,
        maturity,
        spot: 100.0,
        risk_free_rate: 0.05,
        volatility: 0.2,
        dividend_yield: 0.0,
    }
}

fn bench_single_job(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("solve");

    for maturity in [0.25_f64, 1.0, 3.0] {
        group.bench_with_input(
            BenchmarkId::new("european_call", maturity),
            &maturity,
            |b, &maturity| {
                let req = request(OptionKind::EuropeanCall, maturity);
                b.iter(|| solve(black_box(&req), black_box(&config)).unwrap());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("american_put", maturity),
            &maturity,
            |b, &maturity| {
                let req = request(OptionKind::AmericanPut, maturity);
                b.iter(|| solve(black_box(&req), black_box(&config)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_job);
criterion_main!(benches);
