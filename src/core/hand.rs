use std::ops::{Index, RangeFull};

use super::{Card, PokerError, Suit, Value};

/// A small ordered set of cards. Order is the order cards were added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a new empty hand
    ///
    /// # Examples
    ///
    /// ```
    /// use swap_poker::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(7),
        }
    }

    /// Create a hand from cards. No checking for duplicates is done.
    pub fn new_with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// From a str create a new hand.
    ///
    /// Cards are two chars each. They can be run together or separated by
    /// whitespace, and the whole list can be wrapped in square brackets the
    /// way gamelogs print them.
    ///
    /// # Examples
    ///
    /// ```
    /// use swap_poker::core::Hand;
    ///
    /// let packed = Hand::new_from_str("AdKd").unwrap();
    /// let logged = Hand::new_from_str("[Ad Kd]").unwrap();
    /// assert_eq!(packed, logged);
    /// assert_eq!(2, logged.len());
    /// ```
    ///
    /// The same card can't be in a hand twice.
    ///
    /// ```
    /// use swap_poker::core::Hand;
    ///
    /// assert!(Hand::new_from_str("AdAd").is_err());
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        let trimmed = hand_string.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);
        let mut chars = inner.chars().filter(|c| !c.is_whitespace());
        let mut cards: Vec<Card> = Vec::with_capacity(7);

        // Keep looping until we explicitly break
        while let Some(vc) = chars.next() {
            let sc = chars.next().ok_or(PokerError::TooFewChars)?;
            let v = Value::from_char(vc).ok_or(PokerError::UnexpectedValueChar)?;
            let s = Suit::from_char(sc).ok_or(PokerError::UnexpectedSuitChar)?;
            let c = Card::new(v, s);

            if cards.contains(&c) {
                return Err(PokerError::DuplicateCardInHand(c));
            }
            cards.push(c);
        }

        Ok(Self { cards })
    }

    /// Add card at to the hand.
    /// No verification is done at all.
    pub fn push(&mut self, c: Card) {
        self.cards.push(c);
    }

    /// Given a card, is it in the current hand?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// How many cards are in the hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Drop cards until only `len` are left.
    pub fn truncate(&mut self, len: usize) {
        self.cards.truncate(len);
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}

impl Index<usize> for Hand {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl Index<RangeFull> for Hand {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
