use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hashed_tree::{Handle, HashedTree};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Entries are (due, payload) tuples using the blanket TreeEntry impl.
type Entry = (u64, u64);

fn filled(seed: u64, n: usize) -> (HashedTree<Entry>, Vec<Handle>) {
    let mut t = HashedTree::new();
    let handles = lcg(seed)
        .take(n)
        .enumerate()
        .map(|(i, x)| t.add((x, i as u64)))
        .collect();
    (t, handles)
}

fn bench_add_100k(c: &mut Criterion) {
    c.bench_function("hashed_tree::add_100k", |b| {
        b.iter_batched(
            HashedTree::<Entry>::new,
            |mut t| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = t.add((x, i as u64));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_drain_100k(c: &mut Criterion) {
    c.bench_function("hashed_tree::pop_drain_100k", |b| {
        b.iter_batched(
            || filled(3, 100_000).0,
            |mut t| {
                while let Some(e) = t.pop() {
                    black_box(e);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("hashed_tree::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (t, handles) = filled(5, 110_000);
                // Precompute 10k unique victims via a second LCG.
                let n = handles.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let victims: Vec<Handle> = sel.into_iter().map(|i| handles[i]).collect();
                (t, victims)
            },
            |(mut t, victims)| {
                for h in victims {
                    let _ = t.remove(h);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    c.bench_function("hashed_tree::find_hit_10k_on_100k", |b| {
        let (t, handles) = filled(7, 100_000);
        let n = handles.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<Handle> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                handles[(s as usize) % n]
            })
            .collect();
        b.iter(|| {
            for &h in &queries {
                black_box(t.find(h));
            }
        })
    });
}

fn bench_find_miss_10k(c: &mut Criterion) {
    c.bench_function("hashed_tree::find_miss_10k_on_100k", |b| {
        let (mut t, _) = filled(11, 100_000);
        // Handles from removed entries are guaranteed misses.
        let stale: Vec<Handle> = lcg(13)
            .take(10_000)
            .map(|x| t.add((x, 0)))
            .collect();
        for &h in &stale {
            let _ = t.remove(h);
        }
        b.iter(|| {
            for &h in &stale {
                black_box(t.find(h));
            }
        })
    });
}

fn bench_timer_churn(c: &mut Criterion) {
    // Mixed workload shaped like a timer driver: schedule, cancel a
    // third, drain the due prefix.
    c.bench_function("hashed_tree::timer_churn_30k", |b| {
        b.iter_batched(
            HashedTree::<Entry>::new,
            |mut t| {
                let mut pending: Vec<Handle> = Vec::new();
                let mut now = 0u64;
                for (i, x) in lcg(17).take(30_000).enumerate() {
                    pending.push(t.add((now + x % 1024, i as u64)));
                    if i % 3 == 0 {
                        if let Some(h) = pending.pop() {
                            let _ = t.remove(h);
                        }
                    }
                    now += 16;
                    while let Some(&(due, _)) = t.top() {
                        if due > now {
                            break;
                        }
                        black_box(t.pop());
                    }
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_fill;
    config = bench_config();
    targets = bench_add_100k, bench_pop_drain_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_find_hit_10k,
              bench_find_miss_10k,
              bench_timer_churn
}
criterion_main!(benches_fill, benches_ops);
