use thiserror::Error;

/// A round block whose events don't fit the shape of a round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRoundError {
    #[error("Round numbers start at 1")]
    InvalidRoundNumber,
    #[error("The button must be seat 0 or 1, got {0}")]
    InvalidButton(usize),
    #[error("A board has 0, 3, 4, or 5 community cards, got {0}")]
    CommunitySize(usize),
    #[error("Expected 3 hole card snapshots, got {0}")]
    CardSnapshots(usize),
    #[error("Expected 4 betting streets of actions, got {0}")]
    ActionStreets(usize),
    #[error("Expected exactly 2 awards, got {0}")]
    AwardCount(usize),
    #[error("Award of {0} is more than a starting stack")]
    AwardTooLarge(i32),
    #[error("Street {street} shows {hands} hands for a two player game")]
    TooManyHands { street: usize, hands: usize },
    #[error("Hole cards on street {street} have {cards} cards instead of 2")]
    HandSize { street: usize, cards: usize },
    #[error("A fold on street {street} is followed by more action")]
    FoldNotLast { street: usize },
    #[error("Street {street} has action after a fold ended the round")]
    ActionAfterFold { street: usize },
}

/// Everything that can go wrong turning a gamelog into rounds.
#[derive(Error, Debug)]
pub enum GamelogError {
    #[error("Round {round} ending on line {line} is malformed: {source}")]
    Malformed {
        line: usize,
        round: u32,
        #[source]
        source: MalformedRoundError,
    },
    #[error("Round {round} was started but the log ended before it was finished")]
    UnterminatedRound { round: u32 },
    #[error("Unable to read gamelog")]
    Io(#[from] std::io::Error),
}

/// A token that isn't one of `F`, `K`, `C`, or `R<amount>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown action token {0:?}")]
pub struct ActionParseError(pub String);
