use super::Card;

/// Iterate over every `num_cards` sized combination of some cards.
///
/// Useful for trying to find the best 5 card hand from 7 cards.
#[derive(Debug)]
pub struct CardIter<'a> {
    /// All the possible cards that can be dealt
    possible_cards: &'a [Card],

    /// Set of current offsets being used to create card sets.
    idx: Vec<usize>,

    /// Has the first combination been handed out yet.
    started: bool,
}

impl<'a> CardIter<'a> {
    /// Create a new iterator.
    ///
    /// ```
    /// use swap_poker::core::{CardIter, Hand};
    ///
    /// let hand = Hand::new_from_str("AsKsQsJsTs9s8s").unwrap();
    /// // 7 choose 5
    /// assert_eq!(21, CardIter::new(hand.as_slice(), 5).count());
    /// ```
    pub fn new(possible_cards: &'a [Card], num_cards: usize) -> Self {
        Self {
            possible_cards,
            idx: (0..num_cards).collect(),
            started: false,
        }
    }

    /// Move the offsets to the next combination. False when they are exhausted.
    fn advance(&mut self) -> bool {
        let n = self.possible_cards.len();
        let k = self.idx.len();
        // Find the right most offset that can still move forward.
        let Some(level) = (0..k).rev().find(|&i| self.idx[i] < n - k + i) else {
            return false;
        };
        self.idx[level] += 1;
        for i in level + 1..k {
            self.idx[i] = self.idx[i - 1] + 1;
        }
        true
    }
}

impl Iterator for CardIter<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.idx.len() > self.possible_cards.len() {
            return None;
        }
        if self.started {
            if !self.advance() {
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.idx.iter().map(|i| self.possible_cards[*i]).collect())
    }
}
