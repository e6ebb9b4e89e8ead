// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equitree poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use equitree_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let th = "10H".parse::<Card>().unwrap();
//! assert_eq!(ah.to_string(), "AH");
//! assert_eq!(th.rank(), Rank::Ten);
//! ```
//!
//! and a [Deck] type, a set of cards that is only mutated by removing cards,
//! used for sampling without replacement:
//!
//! ```
//! # use equitree_cards::{Card, Deck};
//! let mut rng = rand::rng();
//! let mut deck = Deck::default();
//! deck.remove("AD".parse::<Card>().unwrap());
//!
//! // The deck is not mutated, the sampled cards are removed from the returned deck.
//! let (flop, rest) = deck.sample(3, &mut rng).unwrap();
//! assert_eq!(flop.len(), 3);
//! assert_eq!(deck.count(), 51);
//! assert_eq!(rest.count(), 48);
//! ```
//!
//! To iterate through all k-cards hands:
//!
//! ```no_run
//! # use equitree_cards::Deck;
//! // Iterate through all 7 cards hands (133M hands).
//! let mut counter = 0;
//! Deck::default().for_each(7, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 133_784_560);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
pub use card::{Card, Rank, Suit};

mod deck;
pub use deck::Deck;

mod error;
pub use error::CardError;
