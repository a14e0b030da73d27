use std::fmt::Debug;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use rand::Rng;

use super::Card;
#[cfg(feature = "serde")]
use serde::ser::SerializeSeq;

/// A bitset for cards where each card is one bit in a
/// 64 bit integer. The bit is set iff the card is in the set.
///
/// This backs `Hand`, collision tests between participants
/// and the board, and the undealt portion of the deck while
/// simulating.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_equity::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { cards: 0 }
    }

    /// Insert a card into the bitset.
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet, Suit, Value};
    /// let mut cards = CardBitSet::new();
    ///
    /// cards.insert(Card::new(Value::Six, Suit::Club));
    /// cards.insert(Card::new(Value::King, Suit::Club));
    /// assert_eq!(2, cards.count());
    /// ```
    pub fn insert(&mut self, card: Card) {
        self.cards |= 1 << u8::from(card);
    }

    /// Remove a card from the bitset.
    pub fn remove(&mut self, card: Card) {
        self.cards &= !(1 << u8::from(card));
    }

    /// Is the card in the bitset?
    pub fn contains(&self, card: Card) -> bool {
        (self.cards & (1 << u8::from(card))) != 0
    }

    /// Is the bitset empty?
    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// How many cards are in the bitset?
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    /// Do the two bitsets share no card?
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet};
    /// let mut one = CardBitSet::new();
    /// one.insert(Card::from(0));
    /// let mut two = CardBitSet::new();
    /// two.insert(Card::from(1));
    ///
    /// assert!(one.is_disjoint(two));
    /// two.insert(Card::from(0));
    /// assert!(!one.is_disjoint(two));
    /// ```
    pub fn is_disjoint(&self, other: CardBitSet) -> bool {
        (self.cards & other.cards) == 0
    }

    /// Sample one card uniformly from the bitset.
    ///
    /// Returns `None` if the bitset is empty.
    ///
    /// ```
    /// use rand::rng;
    /// use holdem_equity::core::CardBitSet;
    ///
    /// let mut rng = rng();
    /// let cards = CardBitSet::default();
    /// let card = cards.sample_one(&mut rng);
    ///
    /// assert!(card.is_some());
    /// assert!(cards.contains(card.unwrap()));
    /// ```
    pub fn sample_one<R: Rng>(&self, rng: &mut R) -> Option<Card> {
        if self.is_empty() {
            return None;
        }
        // Pick the nth set bit so every present card is equally likely.
        let mut nth = rng.random_range(0..self.count());
        let mut bits = self.cards;
        loop {
            let idx = bits.trailing_zeros();
            if nth == 0 {
                return Some(Card::from(idx as u8));
            }
            bits &= !(1 << idx);
            nth -= 1;
        }
    }
}

impl Default for CardBitSet {
    /// Create a new bitset with all 52 cards in it
    /// ```
    /// use holdem_equity::core::CardBitSet;
    ///
    /// assert_eq!(52, CardBitSet::default().count());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

impl BitOr<CardBitSet> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOr<Card> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Card) -> Self::Output {
        Self {
            cards: self.cards | (1 << u8::from(rhs)),
        }
    }
}

impl BitOrAssign<CardBitSet> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cards |= rhs.cards;
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= 1 << u8::from(rhs);
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

impl BitAndAssign for CardBitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.cards &= rhs.cards;
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            // Only the 52 card bits take part.
            cards: !self.cards & FIFTY_TWO_ONES,
        }
    }
}

/// The iterator for the CardBitSet.
/// It iterates the cards in index order.
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let card = self.0.trailing_zeros();
        self.0 &= !(1 << card);
        Some(Card::from(card as u8))
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut cards = CardBitSet::new();
        for card in iter {
            cards.insert(card);
        }
        cards
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CardBitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for card in (*self).into_iter() {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct CardBitSetVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for CardBitSetVisitor {
    type Value = CardBitSet;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of cards")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut cards = CardBitSet::new();
        while let Some(card) = seq.next_element()? {
            cards.insert(card);
        }
        Ok(cards)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CardBitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(CardBitSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::Deck;

    #[test]
    fn test_empty() {
        let cards = CardBitSet::new();
        assert!(cards.is_empty());
        assert_eq!(0, cards.count());
    }

    #[test]
    fn test_insert_all() {
        let mut all_cards = CardBitSet::new();
        for card in Deck::default() {
            all_cards.insert(card);
        }

        assert_eq!(52, all_cards.count());
        for card in Deck::default() {
            assert!(all_cards.contains(card));
        }
    }

    #[test]
    fn test_remove() {
        let mut cards = CardBitSet::default();
        for card in Deck::default() {
            assert!(cards.contains(card));
            cards.remove(card);
            assert!(!cards.contains(card));
        }
        assert!(cards.is_empty());
    }

    #[test]
    fn test_not_is_complement() {
        let mut cards = CardBitSet::new();
        cards.insert(Card::from(17));
        cards.insert(Card::from(42));

        let complement = !cards;
        assert_eq!(50, complement.count());
        assert!(!complement.contains(Card::from(17)));
        assert!(cards.is_disjoint(complement));
    }

    #[test]
    fn test_iter_matches_hash_set() {
        let mut hash_set: HashSet<Card> = HashSet::new();
        let mut bit_set = CardBitSet::new();

        for idx in [0u8, 3, 17, 33, 51] {
            hash_set.insert(Card::from(idx));
            bit_set.insert(Card::from(idx));
        }

        assert_eq!(hash_set.len(), bit_set.count());
        for card in bit_set {
            assert!(hash_set.contains(&card));
        }
    }

    #[test]
    fn test_sample_one_singleton() {
        let mut rng = rand::rng();
        let mut cards = CardBitSet::new();
        cards.insert(Card::from(11));

        assert_eq!(Some(Card::from(11)), cards.sample_one(&mut rng));
    }

    #[test]
    fn test_sample_one_empty() {
        let mut rng = rand::rng();
        assert_eq!(None, CardBitSet::new().sample_one(&mut rng));
    }

    #[test]
    fn test_sample_one_no_repeats() {
        let mut rng = rand::rng();
        let mut cards = CardBitSet::default();
        let mut picked: HashSet<Card> = HashSet::new();

        while let Some(card) = cards.sample_one(&mut rng) {
            assert!(picked.insert(card));
            cards.remove(card);
        }
        assert_eq!(52, picked.len());
    }
}
