//! This is the core module. It exports the card, deck, board,
//! and hand ranking code that everything else builds on.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Bitset of cards used for hands and collision checks.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// We want to be able to iterate over k card combinations.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Flattened deck
mod flat_deck;
/// Export the indexable deck.
pub use self::flat_deck::FlatDeck;

/// Community cards and streets.
mod board;
pub use self::board::{Board, Street};

/// 5 card hand ranking code and the evaluator seam.
mod rank;
/// Export the traits and the results.
pub use self::rank::{DefaultEvaluator, Evaluator, Rank, RankCategory, Rankable};

/// The library wide error type.
mod error;
pub use self::error::HoldemEquityError;
