use thiserror::Error;

use super::Card;

/// This is the error type for the whole library.
/// It uses `thiserror` to provide readable error messages.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum HoldemEquityError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card {0} appears more than once in the hand")]
    DuplicateCardInHand(Card),
    #[error("Hands hold 2 hole cards or 5 to 7 evaluated cards, got {0}")]
    InvalidHandSize(usize),
    #[error("Boards hold 0, 3, 4, or 5 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("Card {0} appears more than once on the board")]
    DuplicateCardOnBoard(Card),
    #[error("Pairs can't be suited")]
    InvalidSuitedPairs,
    #[error("Hand is already defined in the range")]
    DuplicateDefinition,
    #[error("Range contains some hands of the group but not all of them")]
    PartialOverlap,
    #[error("Range weights must be in (0, 1], got {0}")]
    WeightOutOfBounds(f64),
    #[error("Range has no hands eligible for sampling")]
    EmptyRange,
    #[error("Card {0} is used by more than one participant or the board")]
    CardCollision(Card),
    #[error("Equity calculations need at least two participants")]
    NotEnoughParticipants,
    #[error("Range could not produce a hand disjoint from the dealt cards")]
    UnsampleableRange,
    #[error("Board is not set to a postflop board")]
    BoardNotSet,
    #[error("No viable hands in the range for this board")]
    NoViableHands,
}
