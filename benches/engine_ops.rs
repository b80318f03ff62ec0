use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use e2048::engine::{apply, legal_directions, move_and_spawn, new_game, spawn_one, Board, Direction};
use e2048::outcomes::all_successors;
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut boards = vec![Board::EMPTY];
    let mut b = new_game(&mut rng);
    boards.push(b);
    // Derive a variety of densities deterministically
    for i in 0..40 {
        let dir = Direction::ALL[i % Direction::ALL.len()];
        if b.can_move(dir) {
            if let Ok(next) = move_and_spawn(b, dir, &mut rng) {
                b = next;
            }
        }
        boards.push(b);
    }
    boards
}

fn bench_apply(c: &mut Criterion) {
    let boards = corpus();
    for dir in Direction::ALL {
        c.bench_function(&format!("apply/{}", dir), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc ^= apply(bd, dir).raw();
                }
                black_box(acc)
            })
        });
    }
    c.bench_function("legal_directions", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for &bd in &boards {
                acc += legal_directions(bd).len();
            }
            black_box(acc)
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_one/fill_board", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, SmallRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                while let Ok(next) = spawn_one(bd, &mut rng) {
                    bd = next;
                }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_successors(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("all_successors", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for &bd in &boards {
                acc += all_successors(bd).values().map(|d| d.len()).sum::<usize>();
            }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_apply, bench_spawn, bench_successors);
criterion_main!(engine_ops);
