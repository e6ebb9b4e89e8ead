// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equitree poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. A hand is ranked into one
//! of ten categories, from high card to royal flush, plus the tiebreak ranks
//! needed to order hands in the same category.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use equitree_eval::*;
//! let h1 = Card::parse_many("AH AD 2C 3D 4S").unwrap();
//! let h2 = Card::parse_many("KH KD 2C 3D 4S").unwrap();
//!
//! let v1 = HandValue::eval(&h1);
//! assert_eq!(v1.rank(), HandRank::OnePair);
//! assert_eq!(v1.tiebreak(), &[14, 4, 3, 2]);
//!
//! assert!(v1 > HandValue::eval(&h2));
//! assert_eq!(compare(&h1, &h2), Showdown::Win);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue, Showdown, compare};

// Reexport cards types.
pub use equitree_cards::{Card, Deck, Rank, Suit};
