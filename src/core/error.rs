use thiserror::Error;

use super::Card;

/// This is the core error type for parsing cards and hands.
/// It uses `thiserror` to provide readable error messages
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokerError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Card already added to hand {0}")]
    DuplicateCardInHand(Card),
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
}

/// Errors from asking a `Deck` for something it can't give.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckStateError {
    #[error("Card {0} is not in the deck")]
    CardNotInDeck(Card),
    #[error("Asked for {requested} cards but only {remaining} remain in the deck")]
    NotEnoughCards { requested: usize, remaining: usize },
}
