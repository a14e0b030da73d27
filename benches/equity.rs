use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use holdem_equity::core::{Board, Hand};
use holdem_equity::holdem::{EquityCalculationBuilder, Range, StartingHand};

fn hand(s: &str) -> Hand {
    Hand::new_from_str(s).expect("Should be able to create a hand.")
}

fn equity_enumerated_flop(c: &mut Criterion) {
    let calc = EquityCalculationBuilder::new()
        .use_board(Board::new_from_str("Ks7h6d").expect("Should parse the board."));
    let hands = [hand("AcAh"), hand("KcKh")];
    c.bench_function("Enumerate AcAh vs KcKh on Ks7h6d", move |b| {
        b.iter(|| calc.calculate(&hands))
    });
}

fn equity_sampled_preflop(c: &mut Criterion) {
    let calc = EquityCalculationBuilder::new().use_sample_size(1_000);
    let hands = [hand("AcAh"), hand("KcKh")];
    c.bench_function("Sample 1000 trials AcAh vs KcKh", move |b| {
        b.iter(|| calc.calculate(&hands))
    });
}

fn equity_range_vs_range(c: &mut Criterion) {
    let mut wide = Range::new();
    for pattern in ["AA", "KK", "AKs", "72o"] {
        wide.define_group(
            &StartingHand::new_from_str(pattern).expect("Should parse the pattern."),
        )
        .expect("Should define the group.");
    }
    let mut queens = Range::new();
    queens
        .define_group(&StartingHand::new_from_str("QQ").expect("Should parse the pattern."))
        .expect("Should define the group.");

    let calc = EquityCalculationBuilder::new().use_sample_size(1_000);
    c.bench_function("Sample 1000 trials range vs QQ", move |b| {
        b.iter(|| calc.calculate_ranges(&[&wide, &queens]))
    });
}

criterion_group!(
    benches,
    equity_enumerated_flop,
    equity_sampled_preflop,
    equity_range_vs_range
);
criterion_main!(benches);
