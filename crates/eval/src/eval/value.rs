// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand ranking.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use equitree_cards::Card;

/// The hand category, the discriminant is the category value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 1,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// Returns all categories from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category value from 1 (high card) to 10 (royal flush).
    pub const fn value(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        write!(f, "{s}")
    }
}

/// Errors from evaluating an invalid hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The hand doesn't have 5, 6, or 7 cards.
    #[error("a hand must have 5 to 7 cards, got {0}")]
    HandSize(usize),
    /// A card appears twice in the hand.
    #[error("duplicate card {0} in hand")]
    DuplicateCard(Card),
}

/// The outcome of a showdown from the first player point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Showdown {
    /// The first hand is stronger.
    Win,
    /// The hands have the same value.
    Tie,
    /// The second hand is stronger.
    Loss,
}

/// Compares two 5 to 7 cards hands.
///
/// Panics if any of the hands doesn't have 5 to 7 cards.
pub fn compare(h1: &[Card], h2: &[Card]) -> Showdown {
    HandValue::eval(h1).showdown(&HandValue::eval(h2))
}

/// A hand value, a category and the ranks that break ties within the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "HandValueFields")]
pub struct HandValue {
    rank: HandRank,
    tiebreak: [u8; 5],
    len: u8,
}

#[derive(Deserialize)]
struct HandValueFields {
    rank: HandRank,
    tiebreak: [u8; 5],
    len: u8,
}

impl TryFrom<HandValueFields> for HandValue {
    type Error = String;

    fn try_from(fields: HandValueFields) -> Result<Self, Self::Error> {
        if fields.len as usize > fields.tiebreak.len() {
            return Err(format!("invalid tiebreak length {}", fields.len));
        }

        Ok(HandValue {
            rank: fields.rank,
            tiebreak: fields.tiebreak,
            len: fields.len,
        })
    }
}

impl HandValue {
    /// Evaluates a 5 to 7 cards hand.
    ///
    /// Panics if the hand doesn't have 5 to 7 cards, duplicate cards are not
    /// checked, use [HandValue::try_eval] for unchecked input.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "5 <= hand len <= 7, got {}",
            cards.len()
        );

        Counts::new(cards).value()
    }

    /// Evaluates a hand checking it has 5 to 7 distinct cards.
    pub fn try_eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EvalError::HandSize(cards.len()));
        }

        let mut seen = 0u64;
        for card in cards {
            let bit = 1u64 << card.index();
            if seen & bit != 0 {
                return Err(EvalError::DuplicateCard(*card));
            }

            seen |= bit;
        }

        Ok(Counts::new(cards).value())
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tiebreak rank values, from the most to the least significant.
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak[..self.len as usize]
    }

    /// Compares this hand value with another.
    pub fn showdown(&self, other: &HandValue) -> Showdown {
        match self.cmp(other) {
            Ordering::Greater => Showdown::Win,
            Ordering::Equal => Showdown::Tie,
            Ordering::Less => Showdown::Loss,
        }
    }

    fn new(rank: HandRank, ranks: impl IntoIterator<Item = u8>) -> Self {
        let mut tiebreak = [0; 5];
        let mut len = 0;
        for (slot, r) in tiebreak.iter_mut().zip(ranks) {
            *slot = r;
            len += 1;
        }

        Self {
            rank,
            tiebreak,
            len,
        }
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.tiebreak().cmp(other.tiebreak()))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.rank, self.tiebreak())
    }
}

/// The ace rank value.
const ACE: u8 = 14;

/// Rank and suit counts for a hand.
///
/// Ranks are stored in bitmasks with bit `r` set for rank value `r`.
struct Counts {
    /// Number of cards per rank value, index 0 and 1 unused.
    ranks: [u8; 15],
    /// Ranks bitmask per suit.
    suits: [u16; 4],
    /// Ranks bitmask for all suits.
    all: u16,
}

impl Counts {
    fn new(cards: &[Card]) -> Self {
        let mut counts = Counts {
            ranks: [0; 15],
            suits: [0; 4],
            all: 0,
        };

        for card in cards {
            let r = card.rank().value();
            counts.ranks[r as usize] += 1;
            counts.suits[card.suit() as usize] |= 1u16 << r;
            counts.all |= 1u16 << r;
        }

        counts
    }

    fn value(&self) -> HandValue {
        let flush = self
            .suits
            .iter()
            .copied()
            .find(|suited| suited.count_ones() >= 5);

        if let Some(high) = flush.and_then(straight_high) {
            let rank = if high == ACE {
                HandRank::RoyalFlush
            } else {
                HandRank::StraightFlush
            };

            return HandValue::new(rank, [high]);
        }

        let quads = self.with_count(4).next();
        let mut trips = self.with_count(3);
        let triple = trips.next();
        let pair = self.with_count(2).next();

        if let Some(quad) = quads {
            return HandValue::new(HandRank::FourOfAKind, [quad, self.best(&[quad])]);
        }

        if let Some(triple) = triple {
            // The second triple or the highest pair.
            let second = trips.next().max(pair);
            if let Some(second) = second {
                return HandValue::new(HandRank::FullHouse, [triple, second]);
            }
        }

        if let Some(suited) = flush {
            return HandValue::new(HandRank::Flush, descending(suited).take(5));
        }

        if let Some(high) = straight_high(self.all) {
            return HandValue::new(HandRank::Straight, [high]);
        }

        if let Some(triple) = triple {
            let used = [triple];
            let kickers = self.kickers(&used).take(2);
            return HandValue::new(HandRank::ThreeOfAKind, [triple].into_iter().chain(kickers));
        }

        let mut pairs = self.with_count(2);
        match (pairs.next(), pairs.next()) {
            (Some(high), Some(low)) => {
                HandValue::new(HandRank::TwoPair, [high, low, self.best(&[high, low])])
            }
            (Some(pair), None) => {
                let used = [pair];
                let kickers = self.kickers(&used).take(3);
                HandValue::new(HandRank::OnePair, [pair].into_iter().chain(kickers))
            }
            _ => HandValue::new(HandRank::HighCard, descending(self.all).take(5)),
        }
    }

    /// Ranks with exactly `count` cards from the highest.
    fn with_count(&self, count: u8) -> impl Iterator<Item = u8> + '_ {
        descending(self.all).filter(move |&r| self.ranks[r as usize] == count)
    }

    /// Ranks not in `used` from the highest.
    fn kickers<'a>(&'a self, used: &'a [u8]) -> impl Iterator<Item = u8> + 'a {
        descending(self.all).filter(move |r| !used.contains(r))
    }

    /// The highest rank not in `used`.
    fn best(&self, used: &[u8]) -> u8 {
        self.kickers(used).next().unwrap_or_default()
    }
}

/// Iterates the ranks in a bitmask from the highest.
fn descending(mask: u16) -> impl Iterator<Item = u8> {
    (2..=ACE).rev().filter(move |&r| mask & (1u16 << r) != 0)
}

/// Returns the high rank of the highest straight in a ranks bitmask.
fn straight_high(mask: u16) -> Option<u8> {
    // The ace also plays as a one for the wheel.
    let mask = if mask & (1u16 << ACE) != 0 { mask | 0b10 } else { mask };

    (5..=ACE).rev().find(|&high| {
        let run = 0b11111u16 << (high - 4);
        mask & run == run
    })
}
