// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator counts ranks and suits into fixed size arrays and rank
//! bitmasks, then checks the categories from the strongest to the weakest.
//! It provides a [HandValue::eval] method for hands the caller knows to be
//! valid, used by the search hot loop, and a checked [HandValue::try_eval]
//! that rejects hands with a wrong size or duplicate cards.
//!
//! [HandValue] is totally ordered: the category is compared first and then
//! the tiebreak ranks, element by element.
mod value;
pub use value::{EvalError, HandRank, HandValue, Showdown, compare};
