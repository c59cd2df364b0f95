//! Reading pokerbots gamelogs into structured rounds, and the chip
//! accounting done on top of them.

mod action;
mod errors;
mod parser;
mod round;
/// Betting summary over many rounds.
pub mod summary;

pub use self::action::{Action, Street};
pub use self::errors::{ActionParseError, GamelogError, MalformedRoundError};
pub use self::parser::{GamelogParser, RoundAccumulator, parse, parse_file};
pub use self::round::{BIG_BLIND, Round, SMALL_BLIND, STARTING_STACK};
pub use self::summary::{RowTotals, SummaryTable};
