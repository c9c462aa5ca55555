use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use itertools::Itertools as _;
use twenty_fourty_eight_rules::{
    BOARD_SIZE,
    board::{Board, Direction, IdAllocator, test_utils},
};

/// Generate a vector of random value grids for benchmarking.
fn generate_boards(count: usize) -> Vec<[[u32; BOARD_SIZE]; BOARD_SIZE]> {
    (0..16)
        .flat_map(|filled| {
            (0..filled).cartesian_product(0..count).map(move |(dup, _)|
            // Generate a random board with the specified number of filled cells
            test_utils::generate_random_board(filled, dup))
        })
        .collect()
}

fn bench_swipe(c: &mut Criterion) {
    const COUNT: usize = 100;

    let mut group = c.benchmark_group("swipe");

    let grids = generate_boards(COUNT);
    let boards = grids
        .iter()
        .map(|&values| Board::from_values(values, &mut IdAllocator::new()))
        .map(Result::unwrap)
        .collect_vec();

    group.throughput(Throughput::Elements(grids.len() as u64 * 4));

    group.bench_function("baseline_swipe", |b| {
        b.iter(|| {
            for &grid in &grids {
                for direction in Direction::ALL {
                    black_box(test_utils::baseline_swipe(grid, direction));
                }
            }
        });
    });

    group.bench_function("board_swipe", |b| {
        b.iter(|| {
            for board in &boards {
                for direction in Direction::ALL {
                    black_box(board.swipe(direction));
                }
            }
        });
    });
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let boards = (0..1000)
        .map(|_| test_utils::generate_full_board(6))
        .map(|values| Board::from_values(values, &mut IdAllocator::new()))
        .map(Result::unwrap)
        .collect_vec();

    group.throughput(Throughput::Elements(boards.len() as u64));

    group.bench_function("has_available_moves", |b| {
        b.iter(|| {
            for board in &boards {
                black_box(board.has_available_moves());
            }
        });
    });
}

criterion_group!(benches, bench_swipe, bench_queries);
criterion_main!(benches);
