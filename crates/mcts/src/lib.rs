// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equitree Monte Carlo Tree Search equity estimator.
//!
//! Estimates the equity of two hole cards against a random opponent hand by
//! searching a tree of partially revealed deals: the opponent hole cards,
//! then the flop, the turn, and the river. Nodes are selected with UCB1, a
//! node is expanded on its first visit by sampling `width` reveals for the
//! next street, and every iteration ends with a random showdown whose result
//! is propagated back to the root.
//!
//! ```
//! # use equitree_mcts::*;
//! let hand = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Ace, Suit::Spades)];
//! let config = SearchConfig {
//!     iterations: 500,
//!     width: 20,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut search = Search::new(hand, config).unwrap();
//! let result = search.run().unwrap();
//! assert_eq!(result.visits, 500);
//! assert!(result.equity > 0.5);
//! ```
//!
//! Use [par_run] to run independent searches on multiple threads and sum
//! their root statistics.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod arena;

pub mod config;
pub use config::{SearchConfig, TieScore};

mod error;
pub use error::SearchError;

pub mod node;
pub use node::{Node, NodeId, Reveal, Stats};

mod parallel;
pub use parallel::par_run;

pub mod search;
pub use search::{Leaf, Search, SearchResult};

// Reexport cards types.
pub use equitree_cards::{Card, Deck, Rank, Suit};
pub use equitree_eval::Showdown;
