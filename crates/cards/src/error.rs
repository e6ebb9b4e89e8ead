// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards errors.
use thiserror::Error;

use crate::Card;

/// Errors from parsing cards or sampling a deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The token is not a `<rank><suit>` card.
    #[error("invalid card token '{0}'")]
    InvalidCardToken(String),
    /// The same card was given more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// Requested more cards than there are in the deck.
    #[error("cannot sample {requested} cards from a deck of {available}")]
    EmptyDeckSample {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards in the deck.
        available: usize,
    },
}
