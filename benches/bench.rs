// Criterion benchmarks for TA Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use ta_match::core::{rank_pairs, Allocator};
use ta_match::models::{Ta, Team};

fn create_team(id: usize) -> Team {
    Team::new(id as i32, (0..4).map(|k| ((id * 7 + k * 3) % 20) as i32))
}

fn create_ta(id: usize) -> Ta {
    Ta::new(1000 + id as i32, (0..3).map(|k| ((id * 5 + k * 11) % 20) as i32))
}

fn bench_rank_pairs(c: &mut Criterion) {
    let teams: Vec<Team> = (0..100).map(create_team).collect();
    let tas: Vec<Ta> = (0..30).map(create_ta).collect();

    c.bench_function("rank_pairs_100x30", |b| {
        b.iter(|| rank_pairs(black_box(&teams), black_box(&tas)));
    });
}

fn bench_allocation(c: &mut Criterion) {
    let allocator = Allocator::new(2).unwrap();

    let mut group = c.benchmark_group("allocation");

    for team_count in [10, 50, 100, 500].iter() {
        let teams: Vec<Team> = (0..*team_count).map(create_team).collect();
        let tas: Vec<Ta> = (0..(*team_count / 3).max(1)).map(create_ta).collect();

        group.bench_with_input(
            BenchmarkId::new("allocate", team_count),
            team_count,
            |b, _| {
                b.iter(|| allocator.allocate(black_box(&teams), black_box(&tas)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rank_pairs, bench_allocation);

criterion_main!(benches);
