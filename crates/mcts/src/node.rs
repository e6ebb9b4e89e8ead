// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Search tree nodes.
//!
//! A node is a partially revealed deal: the opponent hole cards once they
//! have been sampled, the community cards revealed so far, and the deck of
//! cards not yet dealt on the path from the root. The searching player hole
//! cards are the same for every node and are stored by the search.
use serde::{Deserialize, Serialize};
use std::ops::Range;

use equitree_cards::{Card, Deck, Rank, Suit};
use equitree_eval::Showdown;

use crate::TieScore;

/// A node index in the search tree.
pub type NodeId = u32;

/// The next cards to reveal from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// The opponent hole cards.
    Opponent,
    /// The first three community cards.
    Flop,
    /// The fourth community card.
    Turn,
    /// The fifth community card.
    River,
}

impl Reveal {
    /// Number of cards dealt by this reveal.
    pub const fn cards(&self) -> usize {
        match self {
            Reveal::Opponent => 2,
            Reveal::Flop => 3,
            Reveal::Turn | Reveal::River => 1,
        }
    }
}

/// Showdown statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of showdowns.
    pub visits: u32,
    /// Number of showdowns won.
    pub wins: u32,
    /// Number of showdowns tied.
    pub ties: u32,
}

impl Stats {
    /// Number of showdowns lost.
    pub fn losses(&self) -> u32 {
        self.visits - self.wins - self.ties
    }

    /// Records a showdown outcome.
    pub fn record(&mut self, outcome: Showdown) {
        self.visits += 1;
        match outcome {
            Showdown::Win => self.wins += 1,
            Showdown::Tie => self.ties += 1,
            Showdown::Loss => {}
        }
    }

    /// The total reward, wins plus ties scored with `tie_score`.
    pub fn reward(&self, tie_score: TieScore) -> f64 {
        self.wins as f64 + self.ties as f64 * tie_score.value()
    }
}

/// Placeholder for unused board slots.
const NO_CARD: Card = Card::new(Rank::Deuce, Suit::Clubs);

/// Up to five community cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Board {
    cards: [Card; 5],
    len: u8,
}

impl Board {
    fn new(cards: &[Card]) -> Self {
        let mut board = Board {
            cards: [NO_CARD; 5],
            len: 0,
        };

        board.extend(cards);
        board
    }

    fn extend(&mut self, cards: &[Card]) {
        let start = self.len as usize;
        self.cards[start..start + cards.len()].copy_from_slice(cards);
        self.len += cards.len() as u8;
    }

    fn as_slice(&self) -> &[Card] {
        &self.cards[..self.len as usize]
    }
}

/// A search tree node.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    opponent: Option<[Card; 2]>,
    community: Board,
    deck: Deck,
    pub(crate) stats: Stats,
    parent: Option<NodeId>,
    first_child: NodeId,
    num_children: u32,
}

impl Node {
    /// Creates a root node given the undealt cards and the known community cards.
    ///
    /// The board must have at most 5 cards.
    pub(crate) fn root(deck: Deck, community: &[Card]) -> Self {
        Self {
            opponent: None,
            community: Board::new(community),
            deck,
            stats: Stats::default(),
            parent: None,
            first_child: 0,
            num_children: 0,
        }
    }

    /// Creates a child of this node that reveals `cards` and has the reduced `deck`.
    pub(crate) fn child(&self, parent: NodeId, reveal: Reveal, cards: &[Card], deck: Deck) -> Self {
        debug_assert_eq!(cards.len(), reveal.cards());

        let mut child = Self {
            deck,
            stats: Stats::default(),
            parent: Some(parent),
            first_child: 0,
            num_children: 0,
            ..*self
        };

        match reveal {
            Reveal::Opponent => child.opponent = Some([cards[0], cards[1]]),
            _ => child.community.extend(cards),
        }

        child
    }

    pub(crate) fn set_children(&mut self, children: Range<NodeId>) {
        self.first_child = children.start;
        self.num_children = children.end - children.start;
    }

    /// The next cards to reveal, `None` for a terminal node.
    pub fn next_reveal(&self) -> Option<Reveal> {
        if self.opponent.is_none() {
            return Some(Reveal::Opponent);
        }

        match self.community.len {
            0 => Some(Reveal::Flop),
            3 => Some(Reveal::Turn),
            4 => Some(Reveal::River),
            _ => None,
        }
    }

    /// A terminal node has all the community cards.
    pub fn is_terminal(&self) -> bool {
        self.community.len == 5
    }

    /// The opponent hole cards if revealed.
    pub fn opponent(&self) -> Option<[Card; 2]> {
        self.opponent
    }

    /// The revealed community cards.
    pub fn community(&self) -> &[Card] {
        self.community.as_slice()
    }

    /// The cards not dealt on the path to this node.
    pub fn deck(&self) -> Deck {
        self.deck
    }

    /// This node showdown statistics.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children ids.
    pub fn children(&self) -> Range<NodeId> {
        self.first_child..self.first_child + self.num_children
    }

    /// Checks if the node has children.
    pub fn is_expanded(&self) -> bool {
        self.num_children > 0
    }
}
