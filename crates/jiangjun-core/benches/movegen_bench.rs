use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jiangjun_core::movegen::{generate_all_legal_moves, generate_all_moves};
use jiangjun_core::repetition::classify_move;
use jiangjun_core::{Color, Position, START_FEN};

const MIDDLEGAME: &str = "r1bakab1r/9/1cn4c1/p1p1p3p/6p2/2P6/P3P1P1P/1CN1C1N2/9/R1BAKAB1R b";

fn movegen_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    group.sample_size(100);

    for (name, fen) in [("start", START_FEN), ("middlegame", MIDDLEGAME)] {
        let position = Position::from_fen(fen).expect("parse");

        group.bench_function(format!("{name}_pseudo_legal"), |b| {
            b.iter(|| generate_all_moves(black_box(&position.board), position.turn))
        });

        group.bench_function(format!("{name}_legal"), |b| {
            b.iter(|| generate_all_legal_moves(black_box(&position.board), position.turn))
        });

        group.bench_function(format!("{name}_classify"), |b| {
            let mut board = position.board.clone();
            b.iter(|| classify_move(black_box(&mut board), Color::Red))
        });
    }

    group.finish();
}

criterion_group!(benches, movegen_benchmarks);
criterion_main!(benches);
