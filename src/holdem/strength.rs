use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::event;

use crate::core::{Card, Deck, DeckStateError, Rankable};

/// Default chance that a hole card is swapped when the flop comes.
pub const DEFAULT_FLOP_SWAP: f64 = 0.10;
/// Default chance that a hole card is swapped when the turn comes.
pub const DEFAULT_TURN_SWAP: f64 = 0.05;
/// Default number of simulated showdowns per estimate.
pub const DEFAULT_ITERATIONS: usize = 400;

/// Slot of the first card not already assigned to someone's hole.
const FIRST_FREE_SLOT: usize = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrengthError {
    #[error(transparent)]
    Deck(#[from] DeckStateError),
    #[error("Hole cards must be exactly two cards, got {0}")]
    InvalidHoleSize(usize),
    #[error("Board must have 0, 3, 4, or 5 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("At least one iteration is needed")]
    ZeroIterations,
    #[error("Swap probability {0} is not in [0, 1]")]
    InvalidSwapProbability(f64),
}

/// How likely each hole card is to be replaced by a fresh card
/// as the community cards come out.
///
/// A swapped out card is treated as gone from play.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapPolicy {
    /// Chance per hole card when the flop is revealed.
    pub flop: f64,
    /// Chance per hole card when the turn is revealed.
    pub turn: f64,
}

impl SwapPolicy {
    /// Create a policy, checking that both are probabilities.
    ///
    /// ```
    /// use swap_poker::holdem::SwapPolicy;
    ///
    /// assert!(SwapPolicy::new(0.2, 0.1).is_ok());
    /// assert!(SwapPolicy::new(1.5, 0.1).is_err());
    /// ```
    pub fn new(flop: f64, turn: f64) -> Result<Self, StrengthError> {
        let policy = Self { flop, turn };
        policy.validate()?;
        Ok(policy)
    }

    /// Plain hold'em. Cards never get swapped.
    pub const fn none() -> Self {
        Self {
            flop: 0.0,
            turn: 0.0,
        }
    }

    fn validate(&self) -> Result<(), StrengthError> {
        for p in [self.flop, self.turn] {
            if !(0.0..=1.0).contains(&p) {
                return Err(StrengthError::InvalidSwapProbability(p));
            }
        }
        Ok(())
    }
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self {
            flop: DEFAULT_FLOP_SWAP,
            turn: DEFAULT_TURN_SWAP,
        }
    }
}

/// Settings for the monte carlo estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrengthConfig {
    /// Number of simulated showdowns per estimate.
    pub iterations: usize,
    pub swap: SwapPolicy,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            swap: SwapPolicy::default(),
        }
    }
}

/// Anything that can put a number on how good a hand is.
///
/// The result is the chance of winning plus half the chance of
/// tying against one unknown opponent, so always in `[0, 1]`.
pub trait StrengthEstimator {
    fn estimate(&mut self, hole: &[Card], board: &[Card]) -> Result<f64, StrengthError>;
}

/// Estimate hand strength by simulating showdowns against a random hand.
#[derive(Debug, Clone)]
pub struct MonteCarloStrength<R: Rng = StdRng> {
    config: StrengthConfig,
    rng: R,
}

impl MonteCarloStrength<StdRng> {
    /// Create an estimator seeded from the operating system.
    pub fn new(config: StrengthConfig) -> Self {
        Self::new_with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> MonteCarloStrength<R> {
    /// Create an estimator that draws from the given rng.
    pub fn new_with_rng(config: StrengthConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &StrengthConfig {
        &self.config
    }

    /// Estimate against a known opponent hand rather than a random one.
    ///
    /// The opponent's cards can still be swapped out the same way ours are.
    pub fn estimate_versus(
        &mut self,
        hole: &[Card],
        opponent: &[Card],
        board: &[Card],
    ) -> Result<f64, StrengthError> {
        if opponent.len() != 2 {
            return Err(StrengthError::InvalidHoleSize(opponent.len()));
        }
        simulate(&mut self.rng, &self.config, hole, Some(opponent), board)
    }
}

impl<R: Rng> StrengthEstimator for MonteCarloStrength<R> {
    fn estimate(&mut self, hole: &[Card], board: &[Card]) -> Result<f64, StrengthError> {
        simulate(&mut self.rng, &self.config, hole, None, board)
    }
}

/// One off estimate with a freshly seeded rng.
///
/// ```
/// use swap_poker::core::Hand;
/// use swap_poker::holdem::{SwapPolicy, estimate_strength};
///
/// let hole = Hand::new_from_str("AsAh").unwrap();
/// let strength = estimate_strength(hole.as_slice(), &[], 500, SwapPolicy::default()).unwrap();
/// assert!(strength > 0.6);
/// ```
pub fn estimate_strength(
    hole: &[Card],
    board: &[Card],
    iterations: usize,
    swap: SwapPolicy,
) -> Result<f64, StrengthError> {
    let config = StrengthConfig { iterations, swap };
    MonteCarloStrength::new(config).estimate(hole, board)
}

/// Which draw slot each card of one simulated showdown comes from.
///
/// Slots 0 and 1 are our hole cards and 2 and 3 the opponent's. Every
/// slot after that is the next card off the shuffled deck and is used
/// at most once.
#[derive(Debug)]
struct Slots {
    holes: [[usize; 2]; 2],
    community: Vec<usize>,
    next: usize,
}

impl Slots {
    fn new() -> Self {
        Self {
            holes: [[0, 1], [2, 3]],
            community: Vec::with_capacity(5),
            next: FIRST_FREE_SLOT,
        }
    }

    fn deal_community(&mut self, n: usize) {
        self.community.extend(self.next..self.next + n);
        self.next += n;
    }

    /// Give each hole card a chance to be replaced by the next free slot.
    fn swap_holes<R: Rng>(&mut self, rng: &mut R, probability: f64) {
        for slot in self.holes.iter_mut().flatten() {
            if rng.random::<f64>() < probability {
                *slot = self.next;
                self.next += 1;
            }
        }
    }
}

fn simulate<R: Rng>(
    rng: &mut R,
    config: &StrengthConfig,
    hole: &[Card],
    opponent: Option<&[Card]>,
    board: &[Card],
) -> Result<f64, StrengthError> {
    if hole.len() != 2 {
        return Err(StrengthError::InvalidHoleSize(hole.len()));
    }
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(StrengthError::InvalidBoardSize(board.len()));
    }
    if config.iterations == 0 {
        return Err(StrengthError::ZeroIterations);
    }
    config.swap.validate()?;

    // Our two cards, then the opponent's two when they're known.
    let known: Vec<Card> = hole.iter().chain(opponent.unwrap_or_default()).copied().collect();

    let mut deck = Deck::default();
    deck.remove_all(known.iter().chain(board))?;

    let mut ours: Vec<Card> = Vec::with_capacity(7);
    let mut theirs: Vec<Card> = Vec::with_capacity(7);
    let mut score: u64 = 0;

    for _ in 0..config.iterations {
        deck.shuffle(rng);

        let mut slots = Slots::new();
        if board.is_empty() {
            slots.deal_community(3);
            slots.swap_holes(rng, config.swap.flop);
        }
        if board.len() <= 3 {
            slots.deal_community(1);
            slots.swap_holes(rng, config.swap.turn);
        }
        if board.len() <= 4 {
            slots.deal_community(1);
        }

        let drawn = deck.peek(slots.next - known.len())?;
        let card_at = |slot: usize| {
            if slot < known.len() {
                known[slot]
            } else {
                drawn[slot - known.len()]
            }
        };

        ours.clear();
        theirs.clear();
        ours.extend(slots.holes[0].iter().map(|s| card_at(*s)));
        theirs.extend(slots.holes[1].iter().map(|s| card_at(*s)));
        for card in slots.community.iter().map(|s| card_at(*s)).chain(board.iter().copied()) {
            ours.push(card);
            theirs.push(card);
        }

        score += match ours.rank().cmp(&theirs.rank()) {
            std::cmp::Ordering::Greater => 2,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Less => 0,
        };
    }

    let strength = score as f64 / (2 * config.iterations) as f64;
    event!(
        tracing::Level::DEBUG,
        iterations = config.iterations,
        board = board.len(),
        strength,
        "Estimated hand strength"
    );
    Ok(strength)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::Hand;

    fn cards(s: &str) -> Vec<Card> {
        Hand::new_from_str(s).unwrap().into_cards()
    }

    fn seeded(iterations: usize, swap: SwapPolicy) -> MonteCarloStrength<StdRng> {
        MonteCarloStrength::new_with_rng(
            StrengthConfig { iterations, swap },
            StdRng::seed_from_u64(420),
        )
    }

    #[test_log::test]
    fn test_bounds() {
        let mut est = seeded(200, SwapPolicy::default());
        for (hole, board) in [
            ("AsAh", ""),
            ("7c2d", ""),
            ("KdQd", "Jd Td 2c"),
            ("3s4s", "Ah Kh Qh Jc"),
            ("9c9d", "2s 3s 4s 5s 6s"),
        ] {
            let strength = est.estimate(&cards(hole), &cards(board)).unwrap();
            assert!((0.0..=1.0).contains(&strength), "{hole} {board} {strength}");
        }
    }

    #[test]
    fn test_aces_beat_seven_deuce() {
        let mut est = seeded(2_000, SwapPolicy::default());
        let aces = est.estimate(&cards("AsAh"), &[]).unwrap();
        let junk = est.estimate(&cards("7c2d"), &[]).unwrap();
        assert!(aces > 0.7, "{aces}");
        assert!(junk < 0.45, "{junk}");
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = seeded(300, SwapPolicy::default())
            .estimate(&cards("JhTh"), &cards("9h 8c 2d"))
            .unwrap();
        let b = seeded(300, SwapPolicy::default())
            .estimate(&cards("JhTh"), &cards("9h 8c 2d"))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_board_plays_is_a_tie() {
        // A royal flush on the board can't be beaten or improved.
        let board = cards("As Ks Qs Js Ts");
        let mut est = seeded(500, SwapPolicy::none());
        assert_eq!(0.5, est.estimate(&cards("2c3d"), &board).unwrap());
    }

    #[test]
    fn test_nuts_on_river_without_swaps() {
        // Quad aces with no straight flush possible on the board.
        let board = cards("Ac Ad 7h 2s 9d");
        let mut est = seeded(500, SwapPolicy::none());
        assert_eq!(1.0, est.estimate(&cards("AsAh"), &board).unwrap());
    }

    #[test]
    fn test_swaps_only_change_unfinished_boards() {
        // With the river out there's nothing left to swap.
        let board = cards("Ac Ad 7h 2s 9d");
        let mut est = seeded(500, SwapPolicy::new(1.0, 1.0).unwrap());
        assert_eq!(1.0, est.estimate(&cards("AsAh"), &board).unwrap());
    }

    #[test]
    fn test_always_swap_preflop_erases_hole_cards() {
        // Every hole card is replaced on the flop, so aces are no better than a coin flip.
        let mut est = seeded(4_000, SwapPolicy::new(1.0, 0.0).unwrap());
        let strength = est.estimate(&cards("AsAh"), &[]).unwrap();
        assert_abs_diff_eq!(0.5, strength, epsilon = 0.05);
    }

    #[test]
    fn test_versus_is_symmetric() {
        let ak = cards("AsKd");
        let qq = cards("QhQc");
        for swap in [SwapPolicy::none(), SwapPolicy::default()] {
            let mut est = seeded(20_000, swap);
            let ours = est.estimate_versus(&ak, &qq, &[]).unwrap();
            let theirs = est.estimate_versus(&qq, &ak, &[]).unwrap();
            assert_abs_diff_eq!(1.0, ours + theirs, epsilon = 0.03);
        }
    }

    #[test]
    fn test_versus_made_hand_is_exact() {
        let mut est = seeded(100, SwapPolicy::none());
        let board = cards("2c 7d 9h Jd Ks");
        assert_eq!(
            1.0,
            est.estimate_versus(&cards("KdKh"), &cards("AcAd"), &board)
                .unwrap()
        );
        assert_eq!(
            0.0,
            est.estimate_versus(&cards("AcQd"), &cards("KdKh"), &board)
                .unwrap()
        );
    }

    #[test]
    fn test_duplicate_card() {
        let mut est = seeded(10, SwapPolicy::default());
        let err = est
            .estimate(&cards("AsKs"), &cards("As 2d 3c"))
            .unwrap_err();
        assert_eq!(
            StrengthError::Deck(DeckStateError::CardNotInDeck(Card::try_from("As").unwrap())),
            err
        );
    }

    #[test]
    fn test_bad_shapes() {
        let mut est = seeded(10, SwapPolicy::default());
        assert_eq!(
            Err(StrengthError::InvalidBoardSize(2)),
            est.estimate(&cards("AsKs"), &cards("2d 3c"))
        );
        assert_eq!(
            Err(StrengthError::InvalidHoleSize(1)),
            est.estimate(&cards("As"), &[])
        );
        assert_eq!(
            Err(StrengthError::ZeroIterations),
            seeded(0, SwapPolicy::default()).estimate(&cards("AsKs"), &[])
        );
        assert_eq!(
            Err(StrengthError::InvalidSwapProbability(-0.1)),
            seeded(10, SwapPolicy { flop: -0.1, turn: 0.0 }).estimate(&cards("AsKs"), &[])
        );
    }
}
