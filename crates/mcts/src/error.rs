// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Search errors.
use thiserror::Error;

use equitree_cards::CardError;

/// Errors from configuring or running a search.
///
/// Apart from configuration errors these are invariant violations that abort
/// the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The known board doesn't have 0, 3, 4, or 5 cards.
    #[error("invalid board size {0}, expected 0, 3, 4, or 5 cards")]
    InvalidBoard(usize),
    /// UCB1 evaluated on a node or parent without visits.
    #[error("UCB1 undefined for a node with {visits} visits and parent with {parent_visits}")]
    DegenerateUcb1 {
        /// The node visits.
        visits: u32,
        /// The node parent visits, zero for the root.
        parent_visits: u32,
    },
    /// A search thread panicked.
    #[error("search task {0} panicked")]
    TaskPanicked(usize),
    /// Cards bookkeeping error.
    #[error(transparent)]
    Card(#[from] CardError),
}
