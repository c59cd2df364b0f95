//! This is the core module. It exports the card primitives that the
//! estimator and the gamelog code are built on.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Errors for parsing cards and for deck state.
mod error;
pub use self::error::{DeckStateError, PokerError};

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// We want to be able to iterate over five card hands.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::*;

/// Deck is the normal 52 card deck, kept in order.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Hand ranking code for up to seven cards.
mod rank;
/// Export the trait and the results.
pub use self::rank::{Rank, Rankable};
