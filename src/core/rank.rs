use std::fmt;

use super::{Board, CardBitSet, CardIter, Hand, HoldemEquityError, Value};

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
///
/// The payload packs the value bits that decide the hand
/// (the pair, the trips, the two pair values) shifted above
/// the kicker value bits, so deriving `Ord` compares the
/// deciding values first and kickers only on a tie.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two different pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all of the same suit.
    StraightFlush(u32),
}

impl Rank {
    /// Strip the tie-break payload and give back just the
    /// category of the hand. Useful as a histogram key when
    /// looking at board textures.
    pub fn category(&self) -> RankCategory {
        match self {
            Rank::HighCard(_) => RankCategory::HighCard,
            Rank::OnePair(_) => RankCategory::OnePair,
            Rank::TwoPair(_) => RankCategory::TwoPair,
            Rank::ThreeOfAKind(_) => RankCategory::ThreeOfAKind,
            Rank::Straight(_) => RankCategory::Straight,
            Rank::Flush(_) => RankCategory::Flush,
            Rank::FullHouse(_) => RankCategory::FullHouse,
            Rank::FourOfAKind(_) => RankCategory::FourOfAKind,
            Rank::StraightFlush(_) => RankCategory::StraightFlush,
        }
    }
}

/// The nine hand categories without any tie-break payload.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl RankCategory {
    /// Every category, weakest first.
    pub const ALL: [RankCategory; 9] = [
        RankCategory::HighCard,
        RankCategory::OnePair,
        RankCategory::TwoPair,
        RankCategory::ThreeOfAKind,
        RankCategory::Straight,
        RankCategory::Flush,
        RankCategory::FullHouse,
        RankCategory::FourOfAKind,
        RankCategory::StraightFlush,
    ];
}

impl fmt::Display for RankCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RankCategory::HighCard => "High Card",
            RankCategory::OnePair => "Pair",
            RankCategory::TwoPair => "Two Pair",
            RankCategory::ThreeOfAKind => "Three of a Kind",
            RankCategory::Straight => "Straight",
            RankCategory::Flush => "Flush",
            RankCategory::FullHouse => "Full House",
            RankCategory::FourOfAKind => "Four of a Kind",
            RankCategory::StraightFlush => "Straight Flush",
        };
        write!(f, "{name}")
    }
}

/// Bit mask of the wheel (A2345), the one straight where
/// the ace plays low.
const WHEEL: u32 = 1 << (Value::Ace as u32)
    | 1 << (Value::Two as u32)
    | 1 << (Value::Three as u32)
    | 1 << (Value::Four as u32)
    | 1 << (Value::Five as u32);

/// If the value bits form a straight, give its strength:
/// 0 for the wheel up to 9 for the royal straight.
fn rank_straight(value_set: u32) -> Option<u32> {
    if value_set == WHEEL {
        return Some(0);
    }
    for start in 0..9 {
        if value_set == 0b11111 << start {
            return Some(start + 1);
        }
    }
    None
}

/// Rank exactly five cards.
fn rank_five_cards(cards: CardBitSet) -> Rank {
    let mut suit_set: u32 = 0;
    let mut value_set: u32 = 0;
    let mut value_to_count: [u8; 13] = [0; 13];
    for c in cards {
        suit_set |= 1 << (c.suit as u32);
        value_set |= 1 << (c.value as u32);
        value_to_count[c.value as usize] += 1;
    }

    // The major deciding factor for hand rank
    // is the number of unique card values.
    let unique_card_count = value_set.count_ones();

    // Bit mask of every value held exactly `count` times.
    let values_with_count = |count: u8| -> u32 {
        value_to_count
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == count)
            .fold(0, |bits, (v, _)| bits | 1 << v)
    };

    match unique_card_count {
        5 => {
            // Five different values can be a straight flush, a
            // straight, a flush, or just a high card.
            let is_flush = suit_set.count_ones() == 1;
            match (rank_straight(value_set), is_flush) {
                (Some(rank), true) => Rank::StraightFlush(rank),
                (Some(rank), false) => Rank::Straight(rank),
                (None, true) => Rank::Flush(value_set),
                (None, false) => Rank::HighCard(value_set),
            }
        }
        2 => {
            // This can either be a full house or four of a kind.
            let three = values_with_count(3);
            let major_rank = if three != 0 {
                three
            } else {
                values_with_count(4)
            };
            let minor_rank = value_set ^ major_rank;
            if three != 0 {
                Rank::FullHouse(major_rank << 13 | minor_rank)
            } else {
                Rank::FourOfAKind(major_rank << 13 | minor_rank)
            }
        }
        3 => {
            // This can be three of a kind or two pair.
            let three = values_with_count(3);
            if three != 0 {
                Rank::ThreeOfAKind(three << 13 | (value_set ^ three))
            } else {
                let pairs = values_with_count(2);
                Rank::TwoPair(pairs << 13 | (value_set ^ pairs))
            }
        }
        _ => {
            // Four unique values is exactly one pair.
            assert!(unique_card_count == 4);
            let pair = values_with_count(2);
            Rank::OnePair(pair << 13 | (value_set ^ pair))
        }
    }
}

/// Can this turn into a hand rank?
pub trait Rankable {
    /// The set of cards to rank.
    fn rank_bits(&self) -> CardBitSet;

    /// Rank five cards. The caller must pass exactly five.
    fn rank_five(&self) -> Rank {
        let bits = self.rank_bits();
        assert!(bits.count() == 5);
        rank_five_cards(bits)
    }

    /// Rank the best five card combination out of five, six, or
    /// seven cards. Ranking does no caching so duplicate work is
    /// done if this is called more than once on the same cards.
    fn rank(&self) -> Rank {
        let bits = self.rank_bits();
        let count = bits.count();
        assert!((5..=7).contains(&count));
        if count == 5 {
            return rank_five_cards(bits);
        }
        CardIter::new(bits.into_iter().collect(), 5)
            .map(|combo| rank_five_cards(combo.into_iter().collect()))
            .max()
            // A 6 or 7 card set always has at least one combination.
            .unwrap_or(Rank::HighCard(0))
    }
}

impl Rankable for CardBitSet {
    fn rank_bits(&self) -> CardBitSet {
        *self
    }
}

impl Rankable for Hand {
    fn rank_bits(&self) -> CardBitSet {
        CardBitSet::from(*self)
    }
}

/// The seam for hand strength: anything that can map hole
/// cards plus a board to a totally ordered `Rank`. The equity
/// and texture builders accept any implementation.
pub trait Evaluator {
    /// Value of the hand's cards combined with the board cards.
    ///
    /// Pure and deterministic; identical input always gives an
    /// identical `Rank` no matter the card insertion order.
    fn value(&self, hand: &Hand, board: &Board) -> Result<Rank, HoldemEquityError>;
}

/// Evaluator that exhaustively ranks every five card
/// combination of the hand and board.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEvaluator;

impl Evaluator for DefaultEvaluator {
    fn value(&self, hand: &Hand, board: &Board) -> Result<Rank, HoldemEquityError> {
        let mut cards = CardBitSet::from(*hand);
        for c in board.cards() {
            if cards.contains(*c) {
                return Err(HoldemEquityError::CardCollision(*c));
            }
            cards.insert(*c);
        }
        let total = cards.count();
        if !(5..=7).contains(&total) {
            return Err(HoldemEquityError::InvalidHandSize(total));
        }
        Ok(cards.rank())
    }
}
