//! swap_poker is a library for looking back at heads up swap hold'em.
//!
//! Swap hold'em plays like normal two player texas hold'em except each
//! hole card may be replaced by a random card from the deck as the flop
//! and the turn come out.
//!
//! The crate has two halves:
//!
//! * A monte carlo hand strength estimator that knows about swaps.
//! * A gamelog parser that turns an engine log into [`gamelog::Round`]s,
//!   with the chip accounting each round implies.
//!
//! ```
//! use swap_poker::core::Card;
//! use swap_poker::holdem::{SwapPolicy, estimate_strength};
//!
//! let hole = [Card::try_from("As").unwrap(), Card::try_from("Ah").unwrap()];
//! let strength = estimate_strength(&hole, &[], 200, SwapPolicy::default()).unwrap();
//! assert!(strength > 0.5);
//! ```

/// Cards, decks, hands and hand ranking. Nothing in here knows about
/// swaps or gamelogs.
pub mod core;
/// Hand strength estimation for two player hold'em with swaps.
pub mod holdem;
/// Gamelog parsing and per round chip accounting.
pub mod gamelog;
