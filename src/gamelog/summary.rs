//! Per player betting summary over a whole gamelog.
//!
//! Each row picks out some of the rounds (every round, the ones that got
//! to the flop, the ones the player folded, ...) and totals how many
//! chips the player moved on one street of those rounds.
use std::fmt;

use super::action::Street;
use super::round::{Round, STARTING_STACK};

/// Which rounds a row counts, and on what street its chip delta is read.
#[derive(Clone, Copy)]
pub struct SummaryRow {
    pub name: &'static str,
    pub applies: fn(&Round, usize) -> bool,
    pub delta_street: Street,
}

impl fmt::Debug for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryRow")
            .field("name", &self.name)
            .field("delta_street", &self.delta_street)
            .finish()
    }
}

fn reached(round: &Round, street: Street) -> bool {
    round.last_betting_round() >= street
}

/// The rows of the summary, in the order they're shown.
pub const SUMMARY_ROWS: [SummaryRow; 9] = [
    SummaryRow {
        name: "All rounds",
        applies: |_, _| true,
        delta_street: Street::Showdown,
    },
    SummaryRow {
        name: "pre-flop",
        applies: |_, _| true,
        delta_street: Street::PreFlop,
    },
    SummaryRow {
        name: "flop",
        applies: |r, _| reached(r, Street::Flop),
        delta_street: Street::Flop,
    },
    SummaryRow {
        name: "turn",
        applies: |r, _| reached(r, Street::Turn),
        delta_street: Street::Turn,
    },
    SummaryRow {
        name: "river",
        applies: |r, _| reached(r, Street::River),
        delta_street: Street::River,
    },
    SummaryRow {
        name: "face-offs",
        applies: |r, _| r.last_betting_round() == Street::Showdown,
        delta_street: Street::Showdown,
    },
    SummaryRow {
        name: "player folds",
        applies: |r, p| r.fold() == Some(p),
        delta_street: Street::Showdown,
    },
    SummaryRow {
        name: "other player folds",
        applies: |r, p| r.fold() == Some((p + 1) % 2),
        delta_street: Street::Showdown,
    },
    SummaryRow {
        name: "fold diff",
        applies: |r, _| r.fold().is_some(),
        delta_street: Street::Showdown,
    },
];

/// Running totals for one row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowTotals {
    pub name: String,
    pub occurrences: usize,
    pub cumulative_delta: i64,
    pub average_delta: f64,
    /// Smallest absolute delta. Starts at a full stack.
    pub min_bet: i32,
    /// Largest absolute delta.
    pub max_bet: i32,
    /// Mean of the street index each counted round ended on.
    pub average_streets: f64,
}

impl RowTotals {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            occurrences: 0,
            cumulative_delta: 0,
            average_delta: 0.0,
            min_bet: STARTING_STACK,
            max_bet: 0,
            average_streets: 0.0,
        }
    }

    /// Totals with one more round counted.
    #[must_use]
    pub fn record(&self, delta: i32, last_street: Street) -> Self {
        let n = self.occurrences as f64;
        let running_mean = |mean: f64, sample: f64| (mean * n + sample) / (n + 1.0);
        Self {
            name: self.name.clone(),
            occurrences: self.occurrences + 1,
            cumulative_delta: self.cumulative_delta + i64::from(delta),
            average_delta: running_mean(self.average_delta, f64::from(delta)),
            min_bet: self.min_bet.saturating_abs().min(delta.saturating_abs()),
            max_bet: self.max_bet.saturating_abs().max(delta.saturating_abs()),
            average_streets: running_mean(self.average_streets, last_street.index() as f64),
        }
    }
}

/// The summary of every row for one seat.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryTable {
    pub player: usize,
    pub rows: Vec<RowTotals>,
}

impl SummaryTable {
    /// Summarize `rounds` from the point of view of seat `player`.
    pub fn new(rounds: &[Round], player: usize) -> Self {
        let rows = SUMMARY_ROWS
            .iter()
            .map(|row| {
                rounds
                    .iter()
                    .filter(|round| (row.applies)(round, player))
                    .fold(RowTotals::new(row.name), |totals, round| {
                        totals.record(
                            round.continue_cost(row.delta_street, player),
                            round.last_betting_round(),
                        )
                    })
            })
            .collect();
        Self { player, rows }
    }

    pub fn row(&self, name: &str) -> Option<&RowTotals> {
        self.rows.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>11} {:>11} {:>10} {:>8} {:>8} {:>10}",
            format!("player {}", self.player),
            "occurrences",
            "cumulative",
            "avg delta",
            "min bet",
            "max bet",
            "avg street"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} {:>11} {:>11} {:>10.2} {:>8} {:>8} {:>10.2}",
                row.name,
                row.occurrences,
                row.cumulative_delta,
                row.average_delta,
                row.min_bet,
                row.max_bet,
                row.average_streets
            )?;
        }
        Ok(())
    }
}
