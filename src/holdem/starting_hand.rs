use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::{Card, CardBitSet, Hand, HoldemEquityError, Suit, Value};
use crate::holdem::range::HandGroup;

/// Suitedness of a starting hand pattern.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy)]
pub enum Suitedness {
    /// Both cards share one suit.
    Suited,
    /// The cards have different suits.
    OffSuit,
    /// No constraint on the suits.
    Any,
}

/// `StartingHand` represents a two card starting hand pattern of
/// texas hold'em, "pocket aces" or "ace king suited". It can
/// generate all the concrete hands it stands for, which makes it
/// the simple, evenly weighted kind of hand group.
///
/// ```
/// use holdem_equity::holdem::StartingHand;
///
/// // All six combos of pocket aces.
/// let aces = StartingHand::new_from_str("AA").unwrap();
/// assert_eq!(6, aces.possible_hands().len());
/// ```
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy)]
pub struct StartingHand {
    /// The first value.
    pub value_one: Value,
    /// The second value.
    pub value_two: Value,
    /// Which suit combinations to consider.
    pub suited: Suitedness,
}

impl StartingHand {
    /// Parse a shorthand pattern: two value chars optionally
    /// followed by 's' (suited) or 'o' (off-suit). "AA" is every
    /// pocket ace pair, "72o" seven-two off-suit, "AKs" ace king
    /// suited, and "QJ" every queen-jack combo.
    pub fn new_from_str(pattern: &str) -> Result<Self, HoldemEquityError> {
        let mut chars = pattern.chars();
        let value_one = chars
            .next()
            .and_then(Value::from_char)
            .ok_or(HoldemEquityError::UnexpectedValueChar)?;
        let value_two = chars
            .next()
            .and_then(Value::from_char)
            .ok_or(HoldemEquityError::UnexpectedValueChar)?;
        let suited = match chars.next() {
            None => Suitedness::Any,
            Some('s') => Suitedness::Suited,
            Some('o') => Suitedness::OffSuit,
            Some(_) => return Err(HoldemEquityError::UnparsedCharsRemaining),
        };
        if chars.next().is_some() {
            return Err(HoldemEquityError::UnparsedCharsRemaining);
        }
        if value_one == value_two && suited == Suitedness::Suited {
            return Err(HoldemEquityError::InvalidSuitedPairs);
        }
        Ok(Self {
            value_one,
            value_two,
            suited,
        })
    }

    fn hole_hand(&self, suit_one: Suit, suit_two: Suit) -> Hand {
        let mut bits = CardBitSet::new();
        bits.insert(Card::new(self.value_one, suit_one));
        bits.insert(Card::new(self.value_two, suit_two));
        Hand::from_bitset(bits)
    }

    fn create_suited(&self) -> Vec<Hand> {
        // Can't have a suited pair. Not unless you're cheating.
        if self.value_one == self.value_two {
            return vec![];
        }
        Suit::suits()
            .iter()
            .map(|s| self.hole_hand(*s, *s))
            .collect()
    }

    fn create_offsuit(&self) -> Vec<Hand> {
        // Since the values are the same there is no reason to swap the suits.
        let expected_hands = if self.value_one == self.value_two {
            6
        } else {
            12
        };
        self.append_offsuit(Vec::with_capacity(expected_hands))
    }

    fn append_offsuit(&self, mut hands: Vec<Hand>) -> Vec<Hand> {
        let suits = Suit::suits();
        for (i, suit_one) in suits.iter().enumerate() {
            for suit_two in &suits[i + 1..] {
                hands.push(self.hole_hand(*suit_one, *suit_two));
                // If this isn't a pair then the flipped suits is needed.
                if self.value_one != self.value_two {
                    hands.push(self.hole_hand(*suit_two, *suit_one));
                }
            }
        }
        hands
    }

    /// Get all the possible concrete hands represented by this
    /// starting hand pattern.
    pub fn possible_hands(&self) -> Vec<Hand> {
        match self.suited {
            Suitedness::Suited => self.create_suited(),
            Suitedness::OffSuit => self.create_offsuit(),
            Suitedness::Any => self.append_offsuit(self.create_suited()),
        }
    }

    /// Create every possible unique StartingHand.
    pub fn all() -> Vec<StartingHand> {
        let mut hands = Vec::with_capacity(169);
        let values = Value::values();
        for (i, value_one) in values.iter().enumerate() {
            for value_two in &values[i..] {
                hands.push(StartingHand {
                    value_one: *value_one,
                    value_two: *value_two,
                    suited: Suitedness::Any,
                });
            }
        }
        hands
    }
}

impl HandGroup for StartingHand {
    fn all_hands(&self) -> Vec<Hand> {
        self.possible_hands()
    }

    fn contains_hand(&self, hand: &Hand) -> bool {
        self.possible_hands().contains(hand)
    }

    /// Every concrete hand of a pattern is equally likely.
    fn sample<R: Rng>(&self, rng: &mut R) -> Result<Hand, HoldemEquityError> {
        self.possible_hands()
            .choose(rng)
            .copied()
            .ok_or(HoldemEquityError::EmptyRange)
    }

    /// Plain groups carry no weights so matching is just
    /// membership.
    fn matches<R: Rng>(&self, hand: &Hand, _rng: &mut R) -> bool {
        self.contains_hand(hand)
    }
}
