use std::fmt;

use super::{Card, CardBitSet, CardBitSetIter, HoldemEquityError, Suit, Value};

/// The hand sizes that mean something in hold'em: two hole
/// cards, or five to seven cards when evaluating showdowns.
const VALID_HAND_SIZES: [usize; 4] = [2, 5, 6, 7];

/// An immutable, order-insensitive set of cards.
///
/// Two hands compare equal when they hold the same card
/// identities, no matter the order they were given in.
///
/// ```
/// use holdem_equity::core::Hand;
///
/// let h1 = Hand::new_from_str("AcKh").unwrap();
/// let h2 = Hand::new_from_str("KhAc").unwrap();
/// assert_eq!(h1, h2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand(CardBitSet);

impl Hand {
    /// Create a new hand from concrete cards.
    ///
    /// Fails when a card appears twice or when the count is not
    /// a valid hand size (2 hole cards, or 5 to 7 for evaluation).
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::{Card, Hand, Suit, Value};
    ///
    /// let hand = Hand::new_with_cards(vec![
    ///     Card::new(Value::Ace, Suit::Club),
    ///     Card::new(Value::Ace, Suit::Heart),
    /// ])
    /// .unwrap();
    /// assert_eq!(2, hand.count());
    /// ```
    pub fn new_with_cards(cards: Vec<Card>) -> Result<Self, HoldemEquityError> {
        let mut bitset = CardBitSet::new();
        for card in &cards {
            if bitset.contains(*card) {
                return Err(HoldemEquityError::DuplicateCardInHand(*card));
            }
            bitset.insert(*card);
        }
        if !VALID_HAND_SIZES.contains(&bitset.count()) {
            return Err(HoldemEquityError::InvalidHandSize(bitset.count()));
        }
        Ok(Self(bitset))
    }

    /// Parse a hand from concatenated two character card tokens,
    /// for example "AcAh" or "KsQs2d9c8h".
    pub fn new_from_str(hand_string: &str) -> Result<Self, HoldemEquityError> {
        let mut chars = hand_string.chars();
        let mut bitset = CardBitSet::new();

        while let Some(vc) = chars.next() {
            let v = Value::from_char(vc).ok_or(HoldemEquityError::UnexpectedValueChar)?;
            let s = chars
                .next()
                .and_then(Suit::from_char)
                .ok_or(HoldemEquityError::UnexpectedSuitChar)?;

            let c = Card::new(v, s);
            if bitset.contains(c) {
                return Err(HoldemEquityError::DuplicateCardInHand(c));
            }
            bitset.insert(c);
        }

        if !VALID_HAND_SIZES.contains(&bitset.count()) {
            return Err(HoldemEquityError::InvalidHandSize(bitset.count()));
        }
        Ok(Self(bitset))
    }

    /// Build a hand straight from a bitset that is already known
    /// to hold a valid number of distinct cards.
    pub(crate) fn from_bitset(bitset: CardBitSet) -> Self {
        Self(bitset)
    }

    /// Given a card, is it in the current hand?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// How many cards are in the hand?
    pub fn count(&self) -> usize {
        self.0.count()
    }

    /// Iterate the cards in this hand.
    pub fn cards(&self) -> CardBitSetIter {
        self.0.into_iter()
    }

    /// Do this hand and the other set of cards share no card?
    pub fn is_disjoint(&self, other: CardBitSet) -> bool {
        self.0.is_disjoint(other)
    }

    /// Do all cards in this hand share one suit?
    ///
    /// This is only meaningful for two card hole hands; for
    /// larger hands the answer says nothing useful about rank.
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    ///
    /// assert!(Hand::new_from_str("AhKh").unwrap().suited());
    /// assert!(!Hand::new_from_str("AhKs").unwrap().suited());
    /// ```
    pub fn suited(&self) -> bool {
        let mut suits = self.cards().map(|c| c.suit);
        match suits.next() {
            Some(first) => suits.all(|s| s == first),
            None => false,
        }
    }
}

impl From<Hand> for CardBitSet {
    fn from(val: Hand) -> Self {
        val.0
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.cards() {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
