use std::ops::Index;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, DeckStateError, Suit, Value};

/// `Deck` is an ordered deck of cards.
///
/// It starts out holding all 52 cards in a fixed order. Cards can be
/// removed, the remaining cards shuffled, and the next few cards looked at
/// without dealing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Card storage. The next card to be drawn is at index 0.
    cards: Vec<Card>,
}

impl Deck {
    /// Create an empty deck.
    ///
    /// ```
    /// use swap_poker::core::Deck;
    ///
    /// assert!(Deck::new().is_empty());
    /// ```
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// Given a card remove it from the deck.
    ///
    /// Removing a card that isn't there is an error. It usually means the
    /// same card was listed twice.
    ///
    /// ```
    /// use swap_poker::core::{Card, Deck, Suit, Value};
    ///
    /// let mut deck = Deck::default();
    /// let card = Card::new(Value::Ace, Suit::Spade);
    ///
    /// assert!(deck.remove(&card).is_ok());
    /// assert!(deck.remove(&card).is_err());
    /// assert_eq!(51, deck.len());
    /// ```
    pub fn remove(&mut self, c: &Card) -> Result<(), DeckStateError> {
        let idx = self
            .cards
            .iter()
            .position(|card| card == c)
            .ok_or(DeckStateError::CardNotInDeck(*c))?;
        self.cards.remove(idx);
        Ok(())
    }

    /// Remove every card given, failing on the first one that's absent.
    pub fn remove_all<'a, I>(&mut self, cards: I) -> Result<(), DeckStateError>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        for card in cards {
            self.remove(card)?;
        }
        Ok(())
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Randomly shuffle the remaining cards.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Look at the next `n` cards without removing them.
    ///
    /// Until the next shuffle this always returns the same cards.
    pub fn peek(&self, n: usize) -> Result<&[Card], DeckStateError> {
        self.cards
            .get(..n)
            .ok_or(DeckStateError::NotEnoughCards {
                requested: n,
                remaining: self.cards.len(),
            })
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use swap_poker::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        let cards = Suit::suits()
            .into_iter()
            .flat_map(|suit| Value::values().into_iter().map(move |value| Card::new(value, suit)))
            .collect();
        Self { cards }
    }
}

impl Index<usize> for Deck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
