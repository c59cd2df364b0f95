use std::fmt;
use std::str::FromStr;

use super::errors::ActionParseError;

/// One move by a player, in the engine's token format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Action {
    /// `F`
    Fold,
    /// `K`
    Check,
    /// `C`
    Call,
    /// `R<amount>`. The chips each player ends up adding for this raise.
    Raise(i32),
}

impl Action {
    /// How much this action raised by. Zero for anything but a raise.
    pub fn raise_amount(&self) -> i32 {
        match self {
            Action::Raise(amount) => *amount,
            _ => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "F"),
            Action::Check => write!(f, "K"),
            Action::Call => write!(f, "C"),
            Action::Raise(amount) => write!(f, "R{amount}"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// ```
    /// use swap_poker::gamelog::Action;
    ///
    /// assert_eq!(Ok(Action::Raise(12)), "R12".parse());
    /// assert_eq!(Ok(Action::Check), "K".parse());
    /// assert!("X".parse::<Action>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Action::Fold),
            "K" => Ok(Action::Check),
            "C" => Ok(Action::Call),
            _ => s
                .strip_prefix('R')
                .and_then(|amount| amount.parse().ok())
                .map(Action::Raise)
                .ok_or_else(|| ActionParseError(s.to_string())),
        }
    }
}

/// The betting streets of a round, plus showdown once they're all done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    PreFlop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
    /// Every betting street finished without a fold.
    Showdown = 4,
}

impl Street {
    /// The four streets that have betting.
    pub const BETTING: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Street::PreFlop),
            1 => Some(Street::Flop),
            2 => Some(Street::Turn),
            3 => Some(Street::River),
            4 => Some(Street::Showdown),
            _ => None,
        }
    }

    /// The street before this one. None for pre-flop.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Street::from_index)
    }

    /// How many community cards are out while betting on this street.
    pub fn community_cards(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::PreFlop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.pad(name)
    }
}
