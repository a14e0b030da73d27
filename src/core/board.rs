use std::fmt;

use super::{Card, CardBitSet, HoldemEquityError, Suit, Value};

/// The stage a board is at, derived purely from how many
/// community cards have been dealt.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    /// No community cards.
    Preflop,
    /// Three community cards.
    Flop,
    /// Four community cards.
    Turn,
    /// All five community cards.
    River,
}

/// An ordered sequence of 0, 3, 4, or 5 community cards.
///
/// ```
/// use holdem_equity::core::{Board, Street};
///
/// let board = Board::new_from_str("Ks7h6d").unwrap();
/// assert_eq!(Street::Flop, board.street());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty, preflop board.
    pub fn new() -> Self {
        Self { cards: vec![] }
    }

    /// Create a board from concrete cards. Fails when the count
    /// is not 0, 3, 4, or 5 or when a card appears twice.
    pub fn new_with_cards(cards: Vec<Card>) -> Result<Self, HoldemEquityError> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            return Err(HoldemEquityError::InvalidBoardSize(cards.len()));
        }
        let mut seen = CardBitSet::new();
        for card in &cards {
            if seen.contains(*card) {
                return Err(HoldemEquityError::DuplicateCardOnBoard(*card));
            }
            seen.insert(*card);
        }
        Ok(Self { cards })
    }

    /// Parse a board from concatenated two character card
    /// tokens, for example "Ks7h6d".
    pub fn new_from_str(board_string: &str) -> Result<Self, HoldemEquityError> {
        let mut chars = board_string.chars();
        let mut cards = vec![];
        while let Some(vc) = chars.next() {
            let v = Value::from_char(vc).ok_or(HoldemEquityError::UnexpectedValueChar)?;
            let s = chars
                .next()
                .and_then(Suit::from_char)
                .ok_or(HoldemEquityError::UnexpectedSuitChar)?;
            cards.push(Card::new(v, s));
        }
        Self::new_with_cards(cards)
    }

    /// Extend this board with already dealt run out cards. The
    /// caller guarantees the result stays a valid board.
    pub(crate) fn with_run_out(&self, run_out: &[Card]) -> Board {
        let mut cards = self.cards.clone();
        cards.extend_from_slice(run_out);
        Board { cards }
    }

    /// The street this board is at.
    /// Street is a pure function of the card count.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// The community cards in deal order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// How many community cards have been dealt?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The board cards as a bitset for collision checks.
    pub fn bits(&self) -> CardBitSet {
        self.cards.iter().copied().collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_from_len() {
        assert_eq!(Street::Preflop, Board::new().street());
        assert_eq!(Street::Flop, Board::new_from_str("Ks7h6d").unwrap().street());
        assert_eq!(Street::Turn, Board::new_from_str("Ks7h6d2c").unwrap().street());
        assert_eq!(
            Street::River,
            Board::new_from_str("Ks7h6d2cAh").unwrap().street()
        );
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(
            Err(HoldemEquityError::InvalidBoardSize(1)),
            Board::new_from_str("Ks")
        );
        assert_eq!(
            Err(HoldemEquityError::InvalidBoardSize(2)),
            Board::new_from_str("Ks7h")
        );
        assert_eq!(
            Err(HoldemEquityError::InvalidBoardSize(6)),
            Board::new_from_str("Ks7h6d2cAh3s")
        );
    }

    #[test]
    fn test_duplicate_card() {
        let c = Card::new(Value::King, Suit::Spade);
        assert_eq!(
            Err(HoldemEquityError::DuplicateCardOnBoard(c)),
            Board::new_from_str("Ks7hKs")
        );
    }

    #[test]
    fn test_order_preserved() {
        let board = Board::new_from_str("Ks7h6d").unwrap();
        assert_eq!("Ks7h6d", board.to_string());
    }

    #[test]
    fn test_run_out() {
        let board = Board::new_from_str("Ks7h6d").unwrap();
        let full = board.with_run_out(&[
            Card::new(Value::Two, Suit::Club),
            Card::new(Value::Ace, Suit::Heart),
        ]);
        assert_eq!(Street::River, full.street());
        assert_eq!(Street::Flop, board.street());
    }
}
