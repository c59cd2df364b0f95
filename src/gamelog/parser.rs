use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{Level, event};

use crate::core::{Card, Suit, Value};

use super::action::Action;
use super::errors::{GamelogError, MalformedRoundError};
use super::round::{BIG_BLIND, Round};

/// Parse the whole text of a gamelog into its rounds.
///
/// A log without any finished rounds gives an empty `Vec`.
///
/// # Errors
///
/// A round that can't be built, or a round that was started and never
/// finished, stops the whole parse.
///
/// # Example
///
/// ```
/// use swap_poker::gamelog::{Street, parse};
///
/// let log = "Round #1, A (0), B (0)\n\
///            A dealt [As Kd]\n\
///            B dealt [2c 7h]\n\
///            B folds\n\
///            A awarded 1\n\
///            B awarded -1\n\
///            \n";
/// let rounds = parse(log).unwrap();
/// assert_eq!(1, rounds.len());
/// assert_eq!(Street::PreFlop, rounds[0].last_betting_round());
/// ```
pub fn parse(log: &str) -> Result<Vec<Round>, GamelogError> {
    let mut parser = GamelogParser::new();
    for line in log.lines() {
        parser.push_line(line)?;
    }
    parser.finish()
}

/// Read a gamelog file line by line and parse it.
///
/// # Errors
///
/// Everything [`parse`] can fail with, plus any I/O error.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Round>, GamelogError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut parser = GamelogParser::new();
    for line in reader.lines() {
        parser.push_line(&line?)?;
    }
    parser.finish()
}

/// Incremental gamelog parser. Feed it lines in order with
/// [`GamelogParser::push_line`] then call [`GamelogParser::finish`].
#[derive(Debug)]
pub struct GamelogParser {
    rounds: Vec<Round>,
    current: RoundAccumulator,
    complete: bool,
    line_number: usize,
}

impl GamelogParser {
    pub fn new() -> Self {
        Self {
            rounds: Vec::new(),
            current: RoundAccumulator::new(1, 0),
            complete: true,
            line_number: 0,
        }
    }

    /// Rounds finished so far.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Handle one line of the log, without its line ending.
    ///
    /// # Errors
    ///
    /// Only a blank line that finishes a malformed round fails.
    pub fn push_line(&mut self, line: &str) -> Result<(), GamelogError> {
        self.line_number += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        match LogLine::parse(line) {
            Some(LogLine::RoundStart { number }) => {
                if number != self.current.round_number {
                    event!(
                        Level::WARN,
                        header = number,
                        counted = self.current.round_number,
                        "Round header doesn't match the round count"
                    );
                }
                if !self.complete && !self.current.is_empty() {
                    event!(
                        Level::WARN,
                        round = self.current.round_number,
                        line = self.line_number,
                        "Discarding unfinished round"
                    );
                }
                self.current.restart();
                self.complete = false;
            }
            Some(LogLine::Hand(cards)) => self.current.deal(cards),
            Some(LogLine::Award(amount)) => self.current.award(amount),
            Some(LogLine::Board(cards)) => self.current.reveal(cards),
            Some(LogLine::Act(action)) => self.current.act(action),
            Some(LogLine::Bet(amount)) => self.current.bet(amount),
            Some(LogLine::RaiseTo(amount)) => self.current.raise_to(amount),
            Some(LogLine::End) => {
                if !self.complete {
                    self.finish_round()?;
                }
                self.complete = true;
            }
            None => {
                event!(Level::TRACE, line = self.line_number, text = line, "Ignored line");
            }
        }
        Ok(())
    }

    fn finish_round(&mut self) -> Result<(), GamelogError> {
        let next = self.current.next();
        let finished = std::mem::replace(&mut self.current, next);
        let round_number = finished.round_number;
        let round = finished
            .into_round()
            .map_err(|source| GamelogError::Malformed {
                line: self.line_number,
                round: round_number,
                source,
            })?;
        event!(
            Level::DEBUG,
            round = round.round_number(),
            button = round.button(),
            last_street = %round.last_betting_round(),
            "Parsed round"
        );
        self.rounds.push(round);
        Ok(())
    }

    /// All the rounds in the log.
    ///
    /// # Errors
    ///
    /// If a round header was seen and the log ended before the blank line
    /// that finishes it.
    pub fn finish(self) -> Result<Vec<Round>, GamelogError> {
        if !self.complete {
            return Err(GamelogError::UnterminatedRound {
                round: self.current.round_number,
            });
        }
        event!(
            Level::INFO,
            rounds = self.rounds.len(),
            lines = self.line_number,
            "Finished parsing gamelog"
        );
        Ok(self.rounds)
    }
}

impl Default for GamelogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything seen so far for the round being read. Nothing is checked
/// until it's turned into a [`Round`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAccumulator {
    round_number: u32,
    button: usize,
    community: Vec<Card>,
    cards: Vec<Vec<Vec<Card>>>,
    actions: Vec<Vec<Action>>,
    awards: Vec<i32>,
    street: usize,
    last_raise_to: i32,
}

impl RoundAccumulator {
    pub fn new(round_number: u32, button: usize) -> Self {
        Self {
            round_number,
            button,
            community: Vec::new(),
            cards: vec![Vec::new(); 3],
            actions: vec![Vec::new(); 4],
            awards: Vec::new(),
            street: 0,
            last_raise_to: BIG_BLIND,
        }
    }

    /// The accumulator for the round after this one.
    fn next(&self) -> Self {
        Self::new(self.round_number + 1, (self.button + 1) % 2)
    }

    fn restart(&mut self) {
        *self = Self::new(self.round_number, self.button);
    }

    fn is_empty(&self) -> bool {
        self.community.is_empty()
            && self.awards.is_empty()
            && self.cards.iter().all(Vec::is_empty)
            && self.actions.iter().all(Vec::is_empty)
    }

    /// A player's hole cards as shown on the current street.
    pub fn deal(&mut self, hand: Vec<Card>) {
        if self.cards.len() <= self.street {
            self.cards.resize(self.street + 1, Vec::new());
        }
        self.cards[self.street].push(hand);
    }

    /// A new street. Boards are usually printed in full, but a line that
    /// only lists the new cards adds them to what's already out.
    pub fn reveal(&mut self, cards: Vec<Card>) {
        if cards.starts_with(&self.community) {
            self.community = cards;
        } else {
            self.community.extend(cards);
        }
        self.street += 1;
        self.last_raise_to = 0;
    }

    /// Record `action` on the current street.
    pub fn act(&mut self, action: Action) {
        if self.actions.len() <= self.street {
            self.actions.resize(self.street + 1, Vec::new());
        }
        self.actions[self.street].push(action);
    }

    /// An opening bet of `amount`.
    pub fn bet(&mut self, amount: i32) {
        self.act(Action::Raise(amount));
        self.last_raise_to = amount;
    }

    /// A raise to a total of `amount`, recorded as the increase over the
    /// last bet or raise on this street.
    pub fn raise_to(&mut self, amount: i32) {
        self.act(Action::Raise(amount.saturating_sub(self.last_raise_to)));
        self.last_raise_to = amount;
    }

    /// The next award line. Awards are listed in button order.
    pub fn award(&mut self, amount: i32) {
        self.awards.push(amount);
    }

    /// Check everything that was gathered and build the round.
    pub fn into_round(self) -> Result<Round, MalformedRoundError> {
        Round::new(
            self.round_number,
            self.button,
            self.community,
            self.cards,
            self.actions,
            self.awards,
        )
    }
}

/// The lines of a gamelog that mean something. Checked in this order and
/// the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogLine {
    RoundStart { number: u32 },
    Hand(Vec<Card>),
    Award(i32),
    Board(Vec<Card>),
    Act(Action),
    Bet(i32),
    RaiseTo(i32),
    End,
}

impl LogLine {
    fn parse(line: &str) -> Option<Self> {
        if let Some(number) = parse_round_header(line) {
            return Some(LogLine::RoundStart { number });
        }
        if let Some(cards) = after_name(line, " dealt [")
            .or_else(|| after_name(line, "'s hand: ["))
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(parse_card_list)
        {
            return Some(LogLine::Hand(cards));
        }
        if let Some(amount) = after_name(line, " awarded ").and_then(parse_signed) {
            return Some(LogLine::Award(amount));
        }
        if let Some(cards) = ["Flop [", "Turn [", "River ["]
            .iter()
            .find_map(|prefix| line.strip_prefix(*prefix))
            .and_then(|rest| rest.split_once(']'))
            .and_then(|(cards, _)| parse_card_list(cards))
        {
            return Some(LogLine::Board(cards));
        }
        for (suffix, action) in [
            (" folds", Action::Fold),
            (" checks", Action::Check),
            (" calls", Action::Call),
        ] {
            if line.strip_suffix(suffix).is_some_and(|name| !name.is_empty()) {
                return Some(LogLine::Act(action));
            }
        }
        if let Some(amount) = after_name(line, " bets ").and_then(parse_unsigned) {
            return Some(LogLine::Bet(amount));
        }
        if let Some(amount) = after_name(line, " raises to ").and_then(parse_unsigned) {
            return Some(LogLine::RaiseTo(amount));
        }
        if line.is_empty() {
            return Some(LogLine::End);
        }
        None
    }
}

/// The text after `marker` when at least one character of name comes
/// before it. The last occurrence is used so names may contain the marker.
fn after_name<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.rsplit_once(marker)
        .filter(|(name, _)| !name.is_empty())
        .map(|(_, rest)| rest)
}

fn parse_unsigned(s: &str) -> Option<i32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_signed(s: &str) -> Option<i32> {
    match s.strip_prefix('-') {
        Some(digits) => parse_unsigned(digits).map(|v| -v),
        None => parse_unsigned(s),
    }
}

/// `Round #<n>, <name> (<score>), <name> (<score>)`
fn parse_round_header(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("Round #")?;
    let (number, players) = rest.split_once(", ")?;
    let number = u32::try_from(parse_unsigned(number)?).ok()?;

    // The second score is the last parenthesised number on the line.
    let players = players.strip_suffix(')')?;
    let (head, second) = players.rsplit_once('(')?;
    parse_signed(second)?;

    // The first score closes just before some ", " in what's left.
    let has_first = head.match_indices("), ").any(|(idx, _)| {
        head[..idx]
            .rsplit_once('(')
            .and_then(|(_, score)| parse_signed(score))
            .is_some()
    });
    has_first.then_some(number)
}

/// Cards written as `As Kd 2c`. A single whitespace character may follow
/// each card. Values must be upper case and suits lower case.
fn parse_card_list(s: &str) -> Option<Vec<Card>> {
    let mut chars = s.chars().peekable();
    let mut cards = Vec::new();
    while let Some(value_char) = chars.next() {
        if value_char.is_ascii_lowercase() {
            return None;
        }
        let value = Value::from_char(value_char)?;
        let suit_char = chars.next()?;
        if !suit_char.is_ascii_lowercase() {
            return None;
        }
        let suit = Suit::from_char(suit_char)?;
        cards.push(Card::new(value, suit));
        chars.next_if(|c| c.is_whitespace());
    }
    if cards.is_empty() { None } else { Some(cards) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamelog::Street;

    const SHOWDOWN: &str = "Round #1, A (0), B (0)
A dealt [As Kd]
B dealt [2c 7h]
A bets 6
B calls
Flop [Td 9s 2h]
A checks
B checks
Turn [3c]
A checks
B checks
River [8d]
A checks
B checks
A awarded 8
B awarded -8

";

    const FOLD: &str = "Round #2, B (-8), A (8)
B dealt [4c 9h]
A dealt [Qs Jd]
A bets 6
B folds
B awarded -2
A awarded 2

";

    #[test_log::test]
    fn test_parse_showdown() {
        let rounds = parse(SHOWDOWN).unwrap();
        assert_eq!(1, rounds.len());
        let round = &rounds[0];
        assert_eq!(1, round.round_number());
        assert_eq!(0, round.button());
        assert_eq!(Street::Showdown, round.last_betting_round());
        assert_eq!(Some(0), round.winner());
        assert_eq!(8, round.round_cost(Street::Showdown, 0));
        assert_eq!(5, round.community().len());
        assert_eq!(&[Action::Raise(6), Action::Call], round.actions(Street::PreFlop));
    }

    #[test_log::test]
    fn test_parse_fold() {
        let log = format!("{SHOWDOWN}{FOLD}");
        let rounds = parse(&log).unwrap();
        assert_eq!(2, rounds.len());
        let round = &rounds[1];
        assert_eq!(2, round.round_number());
        assert_eq!(1, round.button());
        assert_eq!(Street::PreFlop, round.last_betting_round());
        assert_eq!(Some(1), round.fold());
        assert_eq!(2, round.round_cost(Street::PreFlop, 1));
        assert_eq!(Some(0), round.winner());
    }

    #[test]
    fn test_parse_fold_with_button_on_seat_zero() {
        let log = "Round #1, A (0), B (0)
A bets 6
B folds
A awarded 2
B awarded -2

";
        let rounds = parse(log).unwrap();
        let round = &rounds[0];
        assert_eq!(0, round.button());
        assert_eq!(Some(0), round.winner());
        assert_eq!(2, round.round_cost(Street::PreFlop, 1));
        assert_eq!(8, round.round_cost(Street::PreFlop, 0));
        assert_eq!(0, round.continue_cost(Street::Flop, 1));
    }

    #[test]
    fn test_accumulator_by_hand() {
        let mut acc = RoundAccumulator::new(4, 1);
        acc.deal(vec![Card::try_from("Ah").unwrap(), Card::try_from("Kh").unwrap()]);
        acc.act(Action::Call);
        acc.raise_to(6);
        acc.act(Action::Call);
        acc.reveal(vec![
            Card::try_from("2c").unwrap(),
            Card::try_from("7d").unwrap(),
            Card::try_from("9s").unwrap(),
        ]);
        acc.bet(10);
        acc.act(Action::Fold);
        acc.award(-6);
        acc.award(6);

        let round = acc.into_round().unwrap();
        assert_eq!(4, round.round_number());
        assert_eq!(Street::Flop, round.last_betting_round());
        assert_eq!(
            &[Action::Call, Action::Raise(4), Action::Call],
            round.actions(Street::PreFlop)
        );
        assert_eq!(Some(0), round.winner());
        assert_eq!(6, round.round_cost(Street::Flop, 1));
        assert_eq!(16, round.round_cost(Street::Flop, 0));
    }

    #[test]
    fn test_empty_log() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_title_and_final_lines_are_ignored() {
        let log = format!("6.176 MIT Pokerbots - A vs B\n\n{SHOWDOWN}Final, A (8), B (-8)\n");
        assert_eq!(1, parse(&log).unwrap().len());
    }

    #[test]
    fn test_unterminated_round() {
        let log = SHOWDOWN.trim_end();
        match parse(log) {
            Err(GamelogError::UnterminatedRound { round }) => assert_eq!(1, round),
            other => panic!("Expected an unterminated round, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_round_has_line() {
        let log = "Round #1, A (0), B (0)\nA awarded 8\n\n";
        match parse(log) {
            Err(GamelogError::Malformed {
                line,
                round,
                source,
            }) => {
                assert_eq!(3, line);
                assert_eq!(1, round);
                assert_eq!(MalformedRoundError::AwardCount(1), source);
            }
            other => panic!("Expected a malformed round, got {other:?}"),
        }
    }

    #[test]
    fn test_hand_after_turn_is_malformed() {
        let log = "Round #1, A (0), B (0)
Flop [Td 9s 2h]
Turn [Td 9s 2h 3c]
River [Td 9s 2h 3c 8d]
A's hand: [As Kd]
A awarded 2
B awarded -2

";
        match parse(log) {
            Err(GamelogError::Malformed { source, .. }) => {
                assert_eq!(MalformedRoundError::CardSnapshots(4), source);
            }
            other => panic!("Expected a malformed round, got {other:?}"),
        }
    }

    #[test]
    fn test_raise_deltas() {
        let log = "Round #1, A (0), B (0)
A raises to 4
B raises to 10
A calls
Flop [Td 9s 2h], A (10), B (10)
B bets 5
A raises to 15
B calls
Turn [Td 9s 2h 3c], A (40), B (40)
B checks
A checks
River [Td 9s 2h 3c 8d], A (40), B (40)
B checks
A checks
A awarded -20
B awarded 20

";
        let rounds = parse(log).unwrap();
        let round = &rounds[0];
        assert_eq!(
            &[Action::Raise(2), Action::Raise(6), Action::Call],
            round.actions(Street::PreFlop)
        );
        assert_eq!(
            &[Action::Raise(5), Action::Raise(10), Action::Call],
            round.actions(Street::Flop)
        );
        assert_eq!(10, round.round_cost(Street::PreFlop, 0));
        assert_eq!(25, round.round_cost(Street::River, 1));
        assert_eq!(5, round.community().len());
    }

    #[test]
    fn test_crlf_lines() {
        let log = SHOWDOWN.replace('\n', "\r\n");
        let rounds = parse(&log).unwrap();
        assert_eq!(1, rounds.len());
        assert_eq!(Some(0), rounds[0].winner());
    }

    #[test]
    fn test_new_header_restarts_round() {
        let log = format!("Round #1, A (0), B (0)\nA bets 6\n{SHOWDOWN}");
        let rounds = parse(&log).unwrap();
        assert_eq!(1, rounds.len());
        assert_eq!(&[Action::Raise(6), Action::Call], rounds[0].actions(Street::PreFlop));
    }

    #[test]
    fn test_push_lines() {
        let mut parser = GamelogParser::new();
        for line in SHOWDOWN.lines() {
            parser.push_line(line).unwrap();
        }
        assert_eq!(1, parser.rounds().len());
        assert_eq!(1, parser.finish().unwrap().len());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamelog.txt");
        std::fs::write(&path, format!("{SHOWDOWN}{FOLD}")).unwrap();
        let rounds = parse_file(&path).unwrap();
        assert_eq!(2, rounds.len());
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse_file(dir.path().join("missing.txt")),
            Err(GamelogError::Io(_))
        ));
    }

    #[test]
    fn test_line_patterns() {
        assert_eq!(
            Some(LogLine::RoundStart { number: 12 }),
            LogLine::parse("Round #12, A (-30), B (30)")
        );
        assert_eq!(None, LogLine::parse("Round #x, A (0), B (0)"));
        assert_eq!(None, LogLine::parse("Round #1, A (0)"));
        assert_eq!(
            Some(LogLine::Hand(vec![
                Card::new(Value::Ace, Suit::Spade),
                Card::new(Value::King, Suit::Diamond)
            ])),
            LogLine::parse("A's hand: [As Kd]")
        );
        // Lower case values don't match, so the line is ignored.
        assert_eq!(None, LogLine::parse("A dealt [as Kd]"));
        assert_eq!(None, LogLine::parse("A dealt [As Kx]"));
        assert_eq!(None, LogLine::parse(" dealt [As Kd]"));
        assert_eq!(Some(LogLine::Award(-8)), LogLine::parse("B awarded -8"));
        assert_eq!(None, LogLine::parse("B awarded 8.5"));
        assert_eq!(Some(LogLine::Act(Action::Fold)), LogLine::parse("B folds"));
        assert_eq!(None, LogLine::parse("folds"));
        assert_eq!(Some(LogLine::Bet(6)), LogLine::parse("A bets 6"));
        assert_eq!(None, LogLine::parse("A bets -6"));
        assert_eq!(Some(LogLine::RaiseTo(20)), LogLine::parse("A raises to 20"));
        assert_eq!(
            Some(LogLine::Board(vec![Card::new(Value::Three, Suit::Club)])),
            LogLine::parse("Turn [3c], A (8), B (8)")
        );
        assert_eq!(Some(LogLine::End), LogLine::parse(""));
        assert_eq!(None, LogLine::parse("   "));
        assert_eq!(None, LogLine::parse("A posts the blind of 1"));
    }
}
