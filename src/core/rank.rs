use super::{Card, Hand};

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two different pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all of the same suit.
    StraightFlush(u32),
}

/// Bit set with the wheel's values (A2345).
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Given a bitset of values find the highest straight.
///
/// The wheel is 0, six high is 1 and so on up to broadway at 9.
fn rank_straight(value_set: u32) -> Option<u32> {
    for top in (4..13u32).rev() {
        let mask = 0b11111 << (top - 4);
        if value_set & mask == mask {
            return Some(top - 3);
        }
    }
    if value_set & WHEEL == WHEEL {
        return Some(0);
    }
    None
}

/// Keep only the `n` highest set bits.
fn keep_highest(mut value_set: u32, n: u32) -> u32 {
    while value_set.count_ones() > n {
        value_set &= value_set - 1;
    }
    value_set
}

/// Value of the highest set bit.
fn highest(value_set: u32) -> u32 {
    31 - value_set.leading_zeros()
}

/// Can this turn into a hand rank?
///
/// Up to seven cards are looked at and the best five card hand
/// is what's ranked. With fewer than five cards the rank is made
/// from whatever is there, so no straights or flushes.
pub trait Rankable {
    fn rank(&self) -> Rank;
}

impl Rankable for [Card] {
    fn rank(&self) -> Rank {
        let mut value_set: u32 = 0;
        let mut suit_sets = [0u32; 4];
        let mut counts = [0u8; 13];

        for c in self {
            let v = c.value as u32;
            value_set |= 1 << v;
            suit_sets[c.suit as usize] |= 1 << v;
            counts[v as usize] += 1;
        }

        // Bit sets of values that show up exactly this many times or more.
        let mut quads: u32 = 0;
        let mut trips: u32 = 0;
        let mut pairs: u32 = 0;
        for (v, count) in counts.iter().enumerate() {
            match *count {
                4.. => quads |= 1 << v,
                3 => trips |= 1 << v,
                2 => pairs |= 1 << v,
                _ => {}
            }
        }

        let flush_set = suit_sets.iter().copied().find(|s| s.count_ones() >= 5);

        if let Some(sf) = flush_set.and_then(rank_straight) {
            return Rank::StraightFlush(sf);
        }

        if quads != 0 {
            let major = 1 << highest(quads);
            return Rank::FourOfAKind(major << 13 | keep_highest(value_set ^ major, 1));
        }

        if trips != 0 {
            let major = 1 << highest(trips);
            // Any second set of trips can play as the pair.
            let pair_candidates = (trips ^ major) | pairs;
            if pair_candidates != 0 {
                return Rank::FullHouse(major << 13 | 1 << highest(pair_candidates));
            }
        }

        if let Some(flush) = flush_set {
            return Rank::Flush(keep_highest(flush, 5));
        }

        if let Some(straight) = rank_straight(value_set) {
            return Rank::Straight(straight);
        }

        if trips != 0 {
            let major = 1 << highest(trips);
            return Rank::ThreeOfAKind(major << 13 | keep_highest(value_set ^ major, 2));
        }

        if pairs.count_ones() >= 2 {
            let major = keep_highest(pairs, 2);
            return Rank::TwoPair(major << 13 | keep_highest(value_set ^ major, 1));
        }

        if pairs != 0 {
            let major = 1 << highest(pairs);
            return Rank::OnePair(major << 13 | keep_highest(value_set ^ major, 3));
        }

        Rank::HighCard(keep_highest(value_set, 5))
    }
}

impl Rankable for Vec<Card> {
    fn rank(&self) -> Rank {
        self.as_slice().rank()
    }
}

impl Rankable for Hand {
    fn rank(&self) -> Rank {
        self.as_slice().rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardIter, Value};

    fn rank_of(s: &str) -> Rank {
        Hand::new_from_str(s).unwrap().rank()
    }

    #[test]
    fn test_cmp() {
        assert!(Rank::HighCard(0) < Rank::StraightFlush(0));
        assert!(Rank::HighCard(0) < Rank::FourOfAKind(0));
        assert!(Rank::HighCard(0) < Rank::ThreeOfAKind(0));
    }

    #[test]
    fn test_cmp_high() {
        assert!(Rank::HighCard(0) < Rank::HighCard(100));
    }

    #[test]
    fn test_high_card_hand() {
        let rank = 1 << Value::Ace as u32
            | 1 << Value::Eight as u32
            | 1 << Value::Nine as u32
            | 1 << Value::Ten as u32
            | 1 << Value::Five as u32;
        assert_eq!(Rank::HighCard(rank), rank_of("Ad8h9cTc5c"));
    }

    #[test]
    fn test_flush() {
        let rank = 1 << Value::Ace as u32
            | 1 << Value::Eight as u32
            | 1 << Value::Nine as u32
            | 1 << Value::Ten as u32
            | 1 << Value::Five as u32;
        assert_eq!(Rank::Flush(rank), rank_of("Ad8d9dTd5d"));
    }

    #[test]
    fn test_full_house() {
        let rank = (1 << (Value::Nine as u32)) << 13 | 1 << (Value::Ace as u32);
        assert_eq!(Rank::FullHouse(rank), rank_of("AdAc9d9c9s"));
    }

    #[test]
    fn test_two_pair() {
        let rank = (1 << Value::Ace as u32 | 1 << Value::Nine as u32) << 13 | 1 << Value::Ten as u32;
        assert_eq!(Rank::TwoPair(rank), rank_of("AdAc9d9cTs"));
    }

    #[test]
    fn test_one_pair() {
        let rank = (1 << Value::Ace as u32) << 13
            | 1 << Value::Nine as u32
            | 1 << Value::Eight as u32
            | 1 << Value::Ten as u32;
        assert_eq!(Rank::OnePair(rank), rank_of("AdAc9d8cTs"));
    }

    #[test]
    fn test_four_of_a_kind() {
        assert_eq!(
            Rank::FourOfAKind((1 << (Value::Ace as u32) << 13) | 1 << (Value::Ten as u32)),
            rank_of("AdAcAsAhTs")
        );
    }

    #[test]
    fn test_wheel() {
        assert_eq!(Rank::Straight(0), rank_of("Ad2c3s4h5s"));
    }

    #[test]
    fn test_straight() {
        assert_eq!(Rank::Straight(1), rank_of("2c3s4h5s6d"));
        assert_eq!(Rank::Straight(9), rank_of("TcJsQhKsAd"));
    }

    #[test]
    fn test_straight_flush_beats_quads() {
        let sf = rank_of("9h8h7h6h5h5c5d");
        assert_eq!(Rank::StraightFlush(4), sf);
        assert!(sf > rank_of("AdAcAsAhKs"));
    }

    #[test]
    fn test_three_of_a_kind() {
        let rank = (1 << (Value::Two as u32)) << 13 | 1 << (Value::Five as u32) | 1 << (Value::Six as u32);
        assert_eq!(Rank::ThreeOfAKind(rank), rank_of("2c2s2h5s6d"));
    }

    #[test]
    fn test_seven_card_two_trips_is_full_house() {
        let rank = (1 << (Value::King as u32)) << 13 | 1 << (Value::Four as u32);
        assert_eq!(Rank::FullHouse(rank), rank_of("KcKsKh4s4d4c2h"));
    }

    #[test]
    fn test_short_hands() {
        assert_eq!(Rank::HighCard(0), rank_of(""));
        assert_eq!(
            Rank::OnePair((1 << Value::Ace as u32) << 13),
            rank_of("AsAd")
        );
        assert_eq!(
            Rank::HighCard(1 << Value::Ace as u32 | 1 << Value::King as u32),
            rank_of("AsKs")
        );
    }

    #[test]
    fn test_seven_matches_best_five() {
        let hands = [
            "AsKsQsJsTs9s8s",
            "2c3c4c5c7d8h9s",
            "AdAcKdKcQdQc2s",
            "7h7d7c2s2d3c3h",
            "AhKhQh2h3d4c5s",
            "9s9d4c4h6s6c2d",
            "JcJdJhJs2c3c4c",
            "2h5d8cJsKh3c7d",
        ];
        for s in hands {
            let hand = Hand::new_from_str(s).unwrap();
            let best_five = CardIter::new(hand.as_slice(), 5)
                .map(|cards| cards.rank())
                .max()
                .unwrap();
            assert_eq!(best_five, hand.rank(), "hand {s}");
        }
    }
}
