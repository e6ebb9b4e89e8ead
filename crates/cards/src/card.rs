// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::CardError;

/// A Poker card.
///
/// A card is encoded as a dense index in `0..52`:
///
/// ```text
///   index = (rank - 2) * 4 + suit
///   rank  = deuce=2, trey=3, ..., king=13, ace=14
///   suit  = clubs=0, diamonds=1, hearts=2, spades=3
/// ```
///
/// so that a set of cards fits in the low 52 bits of a `u64`.
///
/// Cards serialize as their string token, e.g. `"AD"` or `"10H"`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self((rank as u8 - 2) * 4 + suit as u8)
    }

    /// Creates a card from its index, returns `None` if `idx >= 52`.
    pub const fn from_index(idx: u8) -> Option<Card> {
        if idx < 52 { Some(Self(idx)) } else { None }
    }

    /// This card index in `0..52`.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the card rank.
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::ALL[(self.0 / 4) as usize]
    }

    /// Returns the card suit.
    #[inline]
    pub const fn suit(&self) -> Suit {
        Suit::ALL[(self.0 % 4) as usize]
    }

    /// Parses a list of cards separated by whitespace or commas.
    ///
    /// Fails if a token is not a card or if a card appears more than once.
    pub fn parse_many(s: &str) -> Result<Vec<Card>, CardError> {
        let mut seen = 0u64;
        let mut cards = Vec::new();

        for token in s.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }

            let card = token.parse::<Card>()?;
            let bit = 1u64 << card.index();
            if seen & bit != 0 {
                return Err(CardError::DuplicateCard(card));
            }

            seen |= bit;
            cards.push(card);
        }

        Ok(cards)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses a `<rank><suit>` token, rank in 2-10, T, J, Q, K, A and suit
    /// in S, C, D, H, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || CardError::InvalidCardToken(token.to_string());

        let mut chars = token.chars();
        let suit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('C') => Suit::Clubs,
            Some('D') => Suit::Diamonds,
            Some('H') => Suit::Hearts,
            Some('S') => Suit::Spades,
            _ => return Err(invalid()),
        };

        let rank = match chars.as_str().to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(invalid()),
        };

        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Card rank, the discriminant is the rank value used for ordering hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// The rank value, 2 for a deuce up to 14 for an ace.
    #[inline]
    pub const fn value(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => "2",
            Rank::Trey => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut ids = HashSet::default();

        for suit in Suit::suits() {
            for rank in Rank::ranks() {
                let card = Card::new(rank, suit);
                assert_eq!(card.rank(), rank);
                assert_eq!(card.suit(), suit);
                assert_eq!(Card::from_index(card.index() as u8), Some(card));
                ids.insert(card.index());
            }
        }

        // Check uniquness and density.
        assert_eq!(ids.len(), 52);
        assert!(ids.iter().all(|&idx| idx < 52));
        assert_eq!(Card::from_index(52), None);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "10H");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_from_string() {
        assert_eq!("AD".parse(), Ok(Card::new(Rank::Ace, Suit::Diamonds)));
        assert_eq!("10H".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("th".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("4C".parse(), Ok(Card::new(Rank::Four, Suit::Clubs)));
        assert_eq!(" qs ".parse(), Ok(Card::new(Rank::Queen, Suit::Spades)));

        for token in ["", "A", "1S", "11H", "AX", "KDD", "0C", "ZS"] {
            assert_eq!(
                token.parse::<Card>(),
                Err(CardError::InvalidCardToken(token.to_string())),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn parse_many_cards() {
        let cards = Card::parse_many("AS, KS QS\tJS,10S").unwrap();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.suit() == Suit::Spades));
        assert_eq!(cards[4].rank(), Rank::Ten);

        assert_eq!(Card::parse_many(""), Ok(vec![]));
        assert_eq!(
            Card::parse_many("AS KD AS"),
            Err(CardError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)))
        );
        assert!(matches!(
            Card::parse_many("AS 1D"),
            Err(CardError::InvalidCardToken(_))
        ));
    }

    #[test]
    fn card_serializes_as_token() {
        let card = Card::new(Rank::Ten, Suit::Clubs);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"10C\"");
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
        assert!(serde_json::from_str::<Card>("\"1C\"").is_err());
    }

    #[test]
    fn rank_values() {
        let values = Rank::ranks().map(|r| r.value()).collect::<Vec<_>>();
        assert_eq!(values, (2..=14).collect::<Vec<_>>());
        assert!(Rank::Ace > Rank::King);
    }
}
