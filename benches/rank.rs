use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use rand::SeedableRng;
use rand::rngs::StdRng;

use holdem_equity::core::{Deck, FlatDeck, Hand, Rankable};

fn rank_one(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(420);
    let d: FlatDeck = Deck::default().into();
    let hand = Hand::new_with_cards(d.sample(&mut rng, 5)).unwrap();
    c.bench_function("Rank one 5 card hand", move |b| b.iter(|| hand.rank()));
}

fn rank_best_seven(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(420);
    let d: FlatDeck = Deck::default().into();
    let hand = Hand::new_with_cards(d.sample(&mut rng, 7)).unwrap();
    c.bench_function("Rank best 5 card hand from 7", move |b| {
        b.iter(|| hand.rank())
    });
}

criterion_group!(benches, rank_one, rank_best_seven);
criterion_main!(benches);
