use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use strmap::Table;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_set_fresh_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(100_000).map(key).collect();
    let mut g = c.benchmark_group("set_fresh_100k");
    g.bench_function("strmap", |b| {
        b.iter_batched(
            Table::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.set(k, i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashMap::<String, u64>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k.clone(), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_set_presized_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(2).take(100_000).map(key).collect();
    c.bench_function("set_presized_100k/strmap", |b| {
        b.iter_batched(
            || Table::<u64>::try_with_capacity(keys.len()).unwrap(),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.set(k, i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_miss(c: &mut Criterion) {
    let keys: Vec<String> = lcg(7).take(100_000).map(key).collect();
    let misses: Vec<String> = lcg(0xdead_beef).take(100_000).map(key).collect();
    let mut t = Table::new();
    let mut m = hashbrown::HashMap::new();
    for (i, k) in keys.iter().enumerate() {
        t.set(k, i as u64).unwrap();
        m.insert(k.clone(), i as u64);
    }

    let mut g = c.benchmark_group("get_100k");
    g.bench_function("strmap/hit", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(t.get(k));
            }
        })
    });
    g.bench_function("hashbrown/hit", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(m.get(k.as_str()));
            }
        })
    });
    g.bench_function("strmap/miss", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(t.get(k));
            }
        })
    });
    g.bench_function("hashbrown/miss", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(m.get(k.as_str()));
            }
        })
    });
    g.finish();
}

fn bench_iterate_100k(c: &mut Criterion) {
    let mut t = Table::new();
    for (i, x) in lcg(11).take(100_000).enumerate() {
        t.set(&key(x), i as u64).unwrap();
    }
    c.bench_function("iterate_100k/cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cur = t.cursor();
            while cur.advance() {
                sum = sum.wrapping_add(*cur.value().unwrap());
            }
            black_box(sum)
        })
    });
    c.bench_function("iterate_100k/iter", |b| {
        b.iter(|| black_box(t.iter().fold(0u64, |acc, (_, v)| acc.wrapping_add(*v))))
    });
}

fn config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_set_fresh_100k, bench_set_presized_100k, bench_get_hit_miss, bench_iterate_100k
}
criterion_main!(benches);
