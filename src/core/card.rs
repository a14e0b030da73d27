use std::fmt;

use super::HoldemEquityError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub fn values() -> [Value; 13] {
        VALUES
    }

    /// Take a u8 and convert it to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Value;
    /// assert_eq!(Value::Four, Value::from_u8(Value::Four as u8));
    /// ```
    pub fn from_u8(v: u8) -> Value {
        VALUES[v as usize % 13]
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the set "Tt23456789jqkaJQKA".
    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    /// Convert this value to a char used in the two character
    /// shorthand for a card.
    pub fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_u8(s: u8) -> Suit {
        SUITS[s as usize % 4]
    }

    pub fn from_char(s: char) -> Option<Suit> {
        match s.to_ascii_lowercase() {
            'd' => Some(Suit::Diamond),
            's' => Some(Suit::Spade),
            'h' => Some(Suit::Heart),
            'c' => Some(Suit::Club),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Diamond => 'd',
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Club => 'c',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card from a value and a suit.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// let c = Card::new(Value::Ace, Suit::Club);
    /// assert_eq!(Value::Ace, c.value);
    /// ```
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Parse a single card from its two character shorthand,
    /// value char followed by suit char ("Ac" is the ace of clubs).
    pub fn new_from_str(card_str: &str) -> Result<Self, HoldemEquityError> {
        let mut chars = card_str.chars();
        let value = chars
            .next()
            .and_then(Value::from_char)
            .ok_or(HoldemEquityError::UnexpectedValueChar)?;
        let suit = chars
            .next()
            .and_then(Suit::from_char)
            .ok_or(HoldemEquityError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(HoldemEquityError::UnparsedCharsRemaining);
        }
        Ok(Self { value, suit })
    }
}

/// Every card gets a stable index in 0..52. The index is
/// `value * 4 + suit` so cards of one value are adjacent.
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.value as u8) * 4 + (c.suit as u8)
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Card {
        Card {
            value: Value::from_u8(n / 4),
            suit: Suit::from_u8(n % 4),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor() {
        let c = Card::new(Value::Three, Suit::Spade);
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Value::Three, Suit::Spade);
        let c2 = Card::new(Value::Four, Suit::Spade);
        let c3 = Card::new(Value::Four, Suit::Club);

        // Make sure that equals works
        assert!(c1 == c1);
        // Make sure that the values are ordered
        assert!(c1 < c2);
        assert!(c2 > c1);
        // Make sure that suit is used.
        assert!(c3 > c2);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_u8_round_trip() {
        for n in 0..52u8 {
            assert_eq!(n, u8::from(Card::from(n)));
        }
    }

    #[test]
    fn test_parse_card() {
        let c = Card::new_from_str("Ac").unwrap();
        assert_eq!(Card::new(Value::Ace, Suit::Club), c);
        assert_eq!("Ac", c.to_string());
    }

    #[test]
    fn test_parse_bad_value() {
        assert_eq!(
            Err(HoldemEquityError::UnexpectedValueChar),
            Card::new_from_str("Xc")
        );
    }

    #[test]
    fn test_parse_bad_suit() {
        assert_eq!(
            Err(HoldemEquityError::UnexpectedSuitChar),
            Card::new_from_str("Ax")
        );
    }

    #[test]
    fn test_parse_extra_chars() {
        assert_eq!(
            Err(HoldemEquityError::UnparsedCharsRemaining),
            Card::new_from_str("Acc")
        );
    }

    #[test]
    fn test_display_round_trip() {
        for n in 0..52u8 {
            let c = Card::from(n);
            assert_eq!(c, Card::new_from_str(&c.to_string()).unwrap());
        }
    }
}
