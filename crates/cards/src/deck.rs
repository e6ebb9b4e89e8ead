// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A cards deck.
use rand::prelude::*;
use std::fmt;

use crate::{Card, CardError, Rank, Suit};

/// A set of distinct cards.
///
/// The deck is a bitset over the card indices so it is cheap to copy, every
/// search node owns its own deck. A deck is mutated only by removing cards,
/// sampling returns the reduced deck and leaves the original untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deck {
    mask: u64,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    const FULL: u64 = (1u64 << Self::SIZE) - 1;

    /// Creates a deck with no cards.
    pub const fn empty() -> Self {
        Self { mask: 0 }
    }

    /// Checks if the deck contains a card.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.mask & Self::bit(card) != 0
    }

    /// Removes a card from the deck, returns false if the card was not in the deck.
    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.mask &= !Self::bit(card);
        present
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Iterates the cards in the deck in index order.
    pub fn iter(&self) -> Iter {
        Iter { mask: self.mask }
    }

    /// Deals a card chosen uniformly at random, returns `None` if the deck is empty.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.is_empty() {
            return None;
        }

        // Skip to the nth set bit.
        let mut mask = self.mask;
        for _ in 0..rng.random_range(0..self.count()) {
            mask &= mask - 1;
        }

        let card = Card::from_index(mask.trailing_zeros() as u8)?;
        self.remove(card);
        Some(card)
    }

    /// Samples `n` distinct cards without replacement.
    ///
    /// Returns the sampled cards and the deck without them, this deck is not
    /// changed. Fails if `n` is greater than the number of cards in the deck.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<(Vec<Card>, Deck), CardError> {
        let mut cards = vec![Card::new(Rank::Ace, Suit::Spades); n];
        let rest = self.sample_into(&mut cards, rng)?;
        Ok((cards, rest))
    }

    /// Fills `out` with distinct cards sampled without replacement.
    ///
    /// Same as [Deck::sample] without allocating.
    pub fn sample_into<R: Rng + ?Sized>(
        &self,
        out: &mut [Card],
        rng: &mut R,
    ) -> Result<Deck, CardError> {
        let error = CardError::EmptyDeckSample {
            requested: out.len(),
            available: self.count(),
        };

        if out.len() > self.count() {
            return Err(error);
        }

        let mut rest = *self;
        for slot in out.iter_mut() {
            *slot = rest.deal(rng).ok_or_else(|| error.clone())?;
        }

        Ok(rest)
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");

        let cards = self.iter().collect::<Vec<_>>();
        let n = cards.len();
        if k > n {
            return;
        }

        // Visits the k-subsets of indices in lexicographic order.
        let mut idx = [0usize; 7];
        for (pos, i) in idx.iter_mut().take(k).enumerate() {
            *i = pos;
        }

        let mut hand = [cards[0]; 7];
        loop {
            for pos in 0..k {
                hand[pos] = cards[idx[pos]];
            }

            f(&hand[..k]);

            let mut pos = k;
            while pos > 0 && idx[pos - 1] == n - k + pos - 1 {
                pos -= 1;
            }

            if pos == 0 {
                break;
            }

            idx[pos - 1] += 1;
            for next in pos..k {
                idx[next] = idx[next - 1] + 1;
            }
        }
    }

    #[inline]
    fn bit(card: Card) -> u64 {
        1u64 << card.index()
    }
}

impl Default for Deck {
    /// A full 52 cards deck.
    fn default() -> Self {
        Self { mask: Self::FULL }
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mask = iter.into_iter().fold(0, |mask, card| mask | Self::bit(card));
        Self { mask }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the cards in a [Deck].
#[derive(Debug, Clone)]
pub struct Iter {
    mask: u64,
}

impl Iterator for Iter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == 0 {
            return None;
        }

        let idx = self.mask.trailing_zeros();
        self.mask &= self.mask - 1;
        Card::from_index(idx as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.mask.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn deck_remove() {
        let mut deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let ad = Card::new(Rank::Ace, Suit::Diamonds);
        assert!(deck.contains(ad));
        assert!(deck.remove(ad));
        assert!(!deck.contains(ad));
        assert!(!deck.remove(ad));
        assert_eq!(deck.count(), 51);
        assert!(deck.iter().all(|c| c != ad));
    }

    #[test]
    fn deck_deal_all() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut deck = Deck::default();
        let mut cards = HashSet::default();

        while let Some(card) = deck.deal(&mut rng) {
            assert!(!deck.contains(card));
            cards.insert(card);
        }

        assert!(deck.is_empty());
        assert_eq!(cards.len(), Deck::SIZE);
    }

    #[test]
    fn deck_sample() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Hearts));
        deck.remove(Card::new(Rank::King, Suit::Hearts));

        let (opponent, rest) = deck.sample(2, &mut rng).unwrap();
        let (board, rest) = rest.sample(5, &mut rng).unwrap();

        // The original deck is unchanged.
        assert_eq!(deck.count(), 50);
        assert_eq!(rest.count(), 43);

        let sampled = opponent.iter().chain(&board).copied().collect::<HashSet<_>>();
        assert_eq!(sampled.len(), 7);
        assert!(sampled.iter().all(|&c| deck.contains(c) && !rest.contains(c)));

        // The sampled cards and the reduced deck partition the deck.
        let union = rest.iter().chain(sampled).collect::<Deck>();
        assert_eq!(union, deck);
    }

    #[test]
    fn deck_sample_too_many() {
        let mut rng = SmallRng::seed_from_u64(1);
        let deck = Card::parse_many("AS KS QS")
            .unwrap()
            .into_iter()
            .collect::<Deck>();

        assert_eq!(
            deck.sample(4, &mut rng),
            Err(CardError::EmptyDeckSample {
                requested: 4,
                available: 3
            })
        );

        let (cards, rest) = deck.sample(3, &mut rng).unwrap();
        assert_eq!(cards.len(), 3);
        assert!(rest.is_empty());
    }

    #[test]
    fn deck_sample_is_reproducible() {
        let deck = Deck::default();
        let s1 = deck.sample(7, &mut SmallRng::seed_from_u64(7)).unwrap();
        let s2 = deck.sample(7, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn deck_deal_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(3);
        let deck = Card::parse_many("2C 3C 4C 5C").unwrap().into_iter().collect::<Deck>();

        let mut counts = [0usize; 52];
        for _ in 0..40_000 {
            let mut d = deck;
            let card = d.deal(&mut rng).unwrap();
            counts[card.index()] += 1;
        }

        for card in deck {
            let count = counts[card.index()];
            assert!((9_000..11_000).contains(&count), "{card} dealt {count} times");
        }
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();

        let mut count = 0;
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            count += 1;
        });
        assert_eq!(count, 2_598_960);

        let mut hands = HashSet::default();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            assert_ne!(cards[0], cards[1]);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);
    }

    #[test]
    fn deck_for_each_small() {
        let deck = Card::parse_many("AS KS").unwrap().into_iter().collect::<Deck>();

        let mut count = 0;
        deck.for_each(3, |_| count += 1);
        assert_eq!(count, 0);

        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    #[should_panic(expected = "2 <= k <= 7")]
    fn deck_for_each_single_card() {
        Deck::default().for_each(1, |_| {});
    }

    #[test]
    #[should_panic(expected = "2 <= k <= 7")]
    fn deck_for_each_eight_cards() {
        Deck::default().for_each(8, |_| {});
    }

    // This takes a while to run in debug mode as it goes through 100M hands.
    #[test]
    #[ignore]
    fn deck_for_each_remove() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));

        let mut count = 0;
        deck.for_each(7, |cards| {
            assert_eq!(cards.len(), 7);
            count += 1;
        });
        assert_eq!(count, 99_884_400);
    }
}
