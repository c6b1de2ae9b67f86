use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use listwatch::listing::{assemble, FieldLists, Listing};
use listwatch::store::diff::{compare_listings_with, MatchPolicy};

/// Synthetic listings for comparison benchmarks
mod fixtures {
    use super::*;

    pub fn listings(count: usize, offset: usize) -> Vec<Listing> {
        (offset..offset + count)
            .map(|i| {
                Listing::new(
                    format!("Camry {}", 2015 + i % 10),
                    format!("${},{:03}", 10 + i % 20, i % 1000),
                    format!("{} mi", i * 13),
                    "Athens",
                    format!("{} mi", i % 500),
                )
            })
            .collect()
    }

    pub fn field_lists(count: usize) -> FieldLists {
        let column = |prefix: &str, len: usize| -> Vec<String> {
            (0..len).map(|i| format!("{prefix} {i}")).collect()
        };

        FieldLists {
            titles: column("title", count),
            prices: column("price", count),
            mileages: column("mileage", count.saturating_sub(3)),
            cities: column("city", count / 2),
            distances: column("distance", count),
        }
    }
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_listings");

    for size in [50usize, 1_000, 20_000] {
        // half the listings overlap between runs
        let previous = fixtures::listings(size, 0);
        let current = fixtures::listings(size, size / 2);

        for policy in [MatchPolicy::Existential, MatchPolicy::Multiset] {
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), size),
                &(&previous, &current),
                |b, (previous, current)| {
                    b.iter(|| compare_listings_with(black_box(previous), black_box(current), policy))
                },
            );
        }
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let fields = fixtures::field_lists(5_000);

    c.bench_function("assemble_ragged_5000", |b| {
        b.iter(|| assemble(black_box(&fields)))
    });
}

criterion_group!(benches, bench_compare, bench_assemble);
criterion_main!(benches);
