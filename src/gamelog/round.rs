use crate::core::Card;
use crate::holdem::{StrengthError, StrengthEstimator};

use super::action::{Action, Street};
use super::errors::MalformedRoundError;

/// Chips each player starts a round with. No award can be larger.
pub const STARTING_STACK: i32 = 200;
/// Posted by the non-button player before any cards are dealt.
pub const BIG_BLIND: i32 = 2;
/// Posted by the button player.
pub const SMALL_BLIND: i32 = 1;

/// How many hole card snapshots a round keeps: pre-flop, flop, and turn.
const SNAPSHOTS: usize = 3;

/// One finished round of heads up swap hold'em, as read out of a gamelog.
///
/// Hands, actions, and awards are all kept in button order. Every
/// accessor that takes a `player` means a table seat (0 is the
/// challenger, who holds the button in round 1) and does the button
/// adjustment itself.
///
/// A `Round` is only built by [`Round::new`], which checks its shape, and
/// never changes after that.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Round {
    round_number: u32,
    button: usize,
    community: Vec<Card>,
    cards: [Vec<[Card; 2]>; SNAPSHOTS],
    actions: [Vec<Action>; 4],
    awards: [i32; 2],
}

impl Round {
    /// Build a round after checking that everything the log produced fits.
    ///
    /// `cards` holds one entry per snapshot (pre-flop, flop, turn) and
    /// `actions` one entry per betting street. Both are taken loosely
    /// shaped so that a log with too many streets is rejected here rather
    /// than lost.
    ///
    /// # Errors
    ///
    /// Any shape violation is a [`MalformedRoundError`].
    pub fn new(
        round_number: u32,
        button: usize,
        community: Vec<Card>,
        cards: Vec<Vec<Vec<Card>>>,
        actions: Vec<Vec<Action>>,
        awards: Vec<i32>,
    ) -> Result<Self, MalformedRoundError> {
        if round_number == 0 {
            return Err(MalformedRoundError::InvalidRoundNumber);
        }
        if button > 1 {
            return Err(MalformedRoundError::InvalidButton(button));
        }
        if !matches!(community.len(), 0 | 3 | 4 | 5) {
            return Err(MalformedRoundError::CommunitySize(community.len()));
        }

        let cards: [Vec<Vec<Card>>; SNAPSHOTS] = cards
            .try_into()
            .map_err(|c: Vec<Vec<Vec<Card>>>| MalformedRoundError::CardSnapshots(c.len()))?;
        let cards = Self::check_snapshots(cards)?;

        let actions: [Vec<Action>; 4] = actions
            .try_into()
            .map_err(|a: Vec<Vec<Action>>| MalformedRoundError::ActionStreets(a.len()))?;
        Self::check_folds(&actions)?;

        let awards: [i32; 2] = awards
            .try_into()
            .map_err(|a: Vec<i32>| MalformedRoundError::AwardCount(a.len()))?;
        if let Some(too_large) = awards
            .iter()
            .find(|a| a.unsigned_abs() > STARTING_STACK.unsigned_abs())
        {
            return Err(MalformedRoundError::AwardTooLarge(*too_large));
        }

        Ok(Self {
            round_number,
            button,
            community,
            cards,
            actions,
            awards,
        })
    }

    fn check_snapshots(
        cards: [Vec<Vec<Card>>; SNAPSHOTS],
    ) -> Result<[Vec<[Card; 2]>; SNAPSHOTS], MalformedRoundError> {
        let mut checked: [Vec<[Card; 2]>; SNAPSHOTS] = Default::default();
        for (street, (snapshot, out)) in cards.into_iter().zip(checked.iter_mut()).enumerate() {
            if snapshot.len() > 2 {
                return Err(MalformedRoundError::TooManyHands {
                    street,
                    hands: snapshot.len(),
                });
            }
            for hand in snapshot {
                let pair: [Card; 2] = hand
                    .try_into()
                    .map_err(|h: Vec<Card>| MalformedRoundError::HandSize {
                        street,
                        cards: h.len(),
                    })?;
                out.push(pair);
            }
        }
        Ok(checked)
    }

    fn check_folds(actions: &[Vec<Action>; 4]) -> Result<(), MalformedRoundError> {
        let mut folded = false;
        for (street, street_actions) in actions.iter().enumerate() {
            if folded && !street_actions.is_empty() {
                return Err(MalformedRoundError::ActionAfterFold { street });
            }
            if let Some(pos) = street_actions.iter().position(|a| *a == Action::Fold) {
                if pos + 1 != street_actions.len() {
                    return Err(MalformedRoundError::FoldNotLast { street });
                }
                folded = true;
            }
        }
        Ok(())
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The seat holding the button (and the small blind) this round.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The most community cards that were shown.
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// Actions taken on one betting street. Empty for showdown.
    pub fn actions(&self, street: Street) -> &[Action] {
        self.actions
            .get(street.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Awards in button order.
    pub fn awards(&self) -> [i32; 2] {
        self.awards
    }

    /// The chips awarded to a seat at the end of the round.
    pub fn award(&self, player: usize) -> i32 {
        self.awards[self.button_index(player)]
    }

    fn button_index(&self, player: usize) -> usize {
        (player + self.button) % 2
    }

    /// The seat that won chips this round, or `None` on a chop.
    pub fn winner(&self) -> Option<usize> {
        self.awards
            .iter()
            .position(|a| *a > 0)
            .map(|idx| self.button_index(idx))
    }

    /// The street the round ended on: the first one that ends in a
    /// fold, or [`Street::Showdown`].
    pub fn last_betting_round(&self) -> Street {
        Street::BETTING
            .into_iter()
            .find(|street| self.actions[street.index()].last() == Some(&Action::Fold))
            .unwrap_or(Street::Showdown)
    }

    /// The seat that folded, or `None` if the round went to showdown.
    ///
    /// The folder is worked out from how many actions the folding street
    /// has: odd means the non-button seat, even means the button.
    pub fn fold(&self) -> Option<usize> {
        let last = self.last_betting_round();
        if last == Street::Showdown {
            return None;
        }
        if self.actions[last.index()].len() % 2 == 1 {
            Some((1 + self.button) % 2)
        } else {
            Some(self.button)
        }
    }

    /// Total chips `player` has put in the pot by the end of `street`.
    ///
    /// For [`Street::Showdown`] this is the player's award instead. The
    /// big blind is counted for both seats, and every raise adds its
    /// amount since the other seat calls it or folds. When the other seat
    /// won, `player` doesn't pay for the raise it folded to on the last
    /// betting street, and a round folded before any other action costs
    /// `player` only the small blind.
    pub fn round_cost(&self, street: Street, player: usize) -> i32 {
        let lost = self.winner() == Some((player + 1) % 2);
        if lost && self.actions[0] == [Action::Fold] {
            return match street {
                Street::Showdown => self.award(player),
                _ => SMALL_BLIND,
            };
        }
        if street == Street::Showdown {
            return self.award(player);
        }

        let mut total = self.actions[..=street.index()]
            .iter()
            .flatten()
            .fold(BIG_BLIND, |acc, a| acc.saturating_add(a.raise_amount()));

        if lost && street == self.last_betting_round() {
            let street_actions = &self.actions[street.index()];
            if let [.., before, Action::Fold] = street_actions.as_slice() {
                total = total.saturating_sub(before.raise_amount());
            }
        }
        total
    }

    /// What `player` paid to see the end of `street` given they'd already
    /// paid for the street before it. Showdown gives the award.
    pub fn continue_cost(&self, street: Street, player: usize) -> i32 {
        match street {
            Street::Showdown => self.award(player),
            Street::PreFlop => self.round_cost(street, player),
            _ => match street.previous() {
                Some(prev) => self
                    .round_cost(street, player)
                    .saturating_sub(self.round_cost(prev, player)),
                None => self.round_cost(street, player),
            },
        }
    }

    /// The hole cards `player` held while betting on `street`.
    ///
    /// River and showdown use the turn snapshot since there are no swaps
    /// after the turn. When the log didn't show the hand for that street
    /// the latest earlier snapshot that did is used.
    pub fn hole_cards(&self, street: Street, player: usize) -> Option<&[Card; 2]> {
        let snapshot = street.index().min(SNAPSHOTS - 1);
        let idx = self.button_index(player);
        self.cards[..=snapshot]
            .iter()
            .rev()
            .find_map(|hands| hands.get(idx))
    }

    /// Cards each seat had swapped, as `(before, after)` pairs.
    ///
    /// Indexed `[seat][transition]` where transition 0 is pre-flop to flop
    /// and 1 is flop to turn. A transition is only compared when both
    /// snapshots show that seat's hand.
    pub fn swaps(&self) -> [[Vec<(Card, Card)>; 2]; 2] {
        let mut result: [[Vec<(Card, Card)>; 2]; 2] = Default::default();
        for (player, per_seat) in result.iter_mut().enumerate() {
            let idx = self.button_index(player);
            for (transition, swapped) in per_seat.iter_mut().enumerate() {
                let before = self.cards[transition].get(idx);
                let after = self.cards[transition + 1].get(idx);
                if let (Some(before), Some(after)) = (before, after) {
                    swapped.extend(
                        before
                            .iter()
                            .zip(after.iter())
                            .filter(|(b, a)| b != a)
                            .map(|(b, a)| (*b, *a)),
                    );
                }
            }
        }
        result
    }

    /// Equity of `player`'s hand on each betting street, using whatever
    /// estimator is handed in. Streets whose board was never shown are
    /// `None`, as are streets where the log never showed the hand.
    ///
    /// # Errors
    ///
    /// Anything the estimator rejects is passed back.
    pub fn strengths<E>(
        &self,
        player: usize,
        estimator: &mut E,
    ) -> Result<[Option<f64>; 4], StrengthError>
    where
        E: StrengthEstimator + ?Sized,
    {
        let mut result = [None; 4];
        for (street, out) in Street::BETTING.into_iter().zip(result.iter_mut()) {
            let board_len = street.community_cards();
            if self.community.len() < board_len {
                break;
            }
            if let Some(hole) = self.hole_cards(street, player) {
                *out = Some(estimator.estimate(hole, &self.community[..board_len])?);
            }
        }
        Ok(result)
    }
}
