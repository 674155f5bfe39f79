use criterion::{criterion_group, criterion_main, Criterion};
use fastrand::Rng;
use santa_ais::families::{Day, Families, Family};
use santa_ais::optimizer::{compute_affinity, generate_population};
use santa_ais::scorer::score;
use std::hint::black_box;

// 5000 families of 2..=6 people with scattered preferences.
fn setup_families() -> Families {
    let mut rng = Rng::with_seed(2019);
    let rows = (0..5000)
        .map(|id| {
            let mut choices = [0 as Day; 10];
            for c in choices.iter_mut() {
                *c = rng.u16(1..=100);
            }
            Family {
                id,
                size: rng.u32(2..=6),
                choices,
            }
        })
        .collect();
    Families::new(rows).expect("Failed to build families")
}

fn criterion_benchmark(c: &mut Criterion) {
    let families = setup_families();
    let mut rng = Rng::with_seed(7);
    let mut population =
        generate_population(&families, 50, &mut rng).expect("Failed to build population");

    c.bench_function("score (5k families)", |b| {
        b.iter(|| score(black_box(&population[0]), black_box(&families)))
    });

    c.bench_function("compute_affinity (50 x 5k)", |b| {
        b.iter(|| compute_affinity(black_box(&mut population)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
