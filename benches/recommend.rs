use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use blendmatch::effects::TERPENE_EFFECTS;
use blendmatch::{assemble, audit, score_all, BlendEngine, ChemicalProfile, IntentPreset};

#[allow(clippy::cast_precision_loss)]
fn make_inventory(n: usize) -> Vec<ChemicalProfile> {
    // Deterministic spread: each item leads with a different table terpene.
    (0..n)
        .map(|i| {
            let lead = &TERPENE_EFFECTS[i % TERPENE_EFFECTS.len()];
            let second = &TERPENE_EFFECTS[(i * 7 + 3) % TERPENE_EFFECTS.len()];
            let scale = 1.0 + (i % 5) as f64 * 0.1;
            ChemicalProfile::builder()
                .external_id(&format!("bench-{i}"))
                .name(format!("Bench {i}"))
                .cbd((i % 4) as f64 * 2.5)
                .terpene(lead.name, 0.9 * scale)
                .terpene(second.name, 0.4 * scale)
                .terpene("Humulene", 0.1)
                .build()
                .unwrap()
        })
        .collect()
}

fn bench_score_and_assemble(c: &mut Criterion) {
    let intent = IntentPreset::Calm.intent();
    let mut group = c.benchmark_group("recommend");

    for size in [8usize, 64, 512] {
        let inventory = make_inventory(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("score_assemble/{size}"), |b| {
            b.iter(|| assemble(score_all(black_box(&inventory), black_box(&intent))));
        });
    }
    group.finish();
}

fn bench_audit(c: &mut Criterion) {
    let intent = IntentPreset::Focus.intent();
    let blends = assemble(score_all(&make_inventory(32), &intent));

    c.bench_function("recommend/audit_three", |b| {
        b.iter(|| {
            for blend in &blends {
                black_box(audit(black_box(blend), &intent));
            }
        });
    });
}

fn bench_engine(c: &mut Criterion) {
    let engine = BlendEngine::default();
    let inventory = make_inventory(64);
    let intent = IntentPreset::Sleep.intent();

    c.bench_function("recommend/engine_64", |b| {
        b.iter(|| engine.recommend(black_box(&intent), black_box(&inventory)));
    });
}

criterion_group!(benches, bench_score_and_assemble, bench_audit, bench_engine);
criterion_main!(benches);
