use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nutri_risk_agent::seed::default_foods;
use nutri_risk_agent::statistics::{mode, variance_and_std_dev};
use nutri_risk_agent::{NutrientColumn, RuleEngine};

fn bench_classify(c: &mut Criterion) {
    let engine = RuleEngine::default();
    let foods = default_foods();

    c.bench_function("classify_seed_foods", |b| {
        b.iter(|| {
            for food in &foods {
                black_box(engine.classify(black_box(&food.profile)));
            }
        })
    });
}

fn bench_statistics(c: &mut Criterion) {
    let sodium: Vec<f64> = default_foods()
        .iter()
        .map(|f| f.profile.get(NutrientColumn::Sodium))
        .collect();

    c.bench_function("sodium_variance_and_mode", |b| {
        b.iter(|| {
            black_box(variance_and_std_dev(black_box(&sodium)));
            black_box(mode(black_box(&sodium)));
        })
    });
}

criterion_group!(benches, bench_classify, bench_statistics);
criterion_main!(benches);
