// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo Tree Search over the unseen cards.
//!
//! Each iteration walks down from the root to a leaf, expands the leaf on its
//! first visit, runs one random showdown from the leaf, and adds the outcome
//! to the leaf and all its ancestors:
//!
//! - a terminal node (all five community cards revealed) is simulated,
//! - a node without visits is expanded with `width` children, each revealing
//!   an independent random sample of the next cards, and then simulated,
//! - a visited node descends into its first unvisited child, or into the
//!   child with the highest UCB1 score when all children have been visited.
use log::{info, warn};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    time::{Duration, Instant},
};

use equitree_cards::{Card, CardError, Deck, Rank, Suit};
use equitree_eval::{HandValue, Showdown};

use crate::{
    SearchConfig, SearchError, TieScore,
    arena::Arena,
    node::{Node, NodeId, Stats},
};

/// The root node id.
const ROOT: NodeId = 0;

/// The leaf selected by a descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// The node to simulate from.
    pub node: NodeId,
    /// The node has no visits and should be expanded before simulating.
    pub expand: bool,
}

/// A Monte Carlo Tree Search for a pair of hole cards.
#[derive(Debug)]
pub struct Search<R = SmallRng> {
    config: SearchConfig,
    hand: [Card; 2],
    arena: Arena,
    rng: R,
    out_of_nodes: bool,
}

impl Search<SmallRng> {
    /// Creates a search with no known community cards.
    pub fn new(hand: [Card; 2], config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_board(hand, &[], config)
    }

    /// Creates a search with 0, 3, 4, or 5 known community cards.
    ///
    /// The generator is seeded from the config seed or from the OS.
    pub fn with_board(
        hand: [Card; 2],
        board: &[Card],
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Self::with_rng(hand, board, config, rng)
    }
}

impl<R: Rng> Search<R> {
    /// Creates a search that samples cards with the given generator.
    pub fn with_rng(
        hand: [Card; 2],
        board: &[Card],
        config: SearchConfig,
        rng: R,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(SearchError::InvalidBoard(board.len()));
        }

        let mut deck = Deck::default();
        for &card in hand.iter().chain(board) {
            if !deck.remove(card) {
                return Err(CardError::DuplicateCard(card).into());
            }
        }

        let mut arena = Arena::default();
        arena.push(Node::root(deck, board));

        Ok(Self {
            config,
            hand,
            arena,
            rng,
            out_of_nodes: false,
        })
    }

    /// Runs the configured number of iterations.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        info!(
            "Searching {}{} board {:?} iterations {} width {}",
            self.hand[0],
            self.hand[1],
            self.root().community(),
            self.config.iterations,
            self.config.width
        );

        let now = Instant::now();
        for _ in 0..self.config.iterations {
            self.step()?;
        }

        let result = self.result(now.elapsed());
        info!(
            "Search done equity {:.4} nodes {} elapsed {:.3}s",
            result.equity,
            result.nodes,
            result.elapsed.as_secs_f64()
        );

        Ok(result)
    }

    /// Runs one iteration: descent, expansion, simulation, and backpropagation.
    pub fn step(&mut self) -> Result<(), SearchError> {
        let leaf = self.descend()?;
        if leaf.expand {
            self.expand(leaf.node)?;
        }

        let outcome = self.simulate(leaf.node)?;
        self.backpropagate(leaf.node, outcome);
        Ok(())
    }

    /// Walks down from the root to the node to simulate from.
    pub fn descend(&self) -> Result<Leaf, SearchError> {
        let mut id = ROOT;

        loop {
            let node = self.arena.get(id);

            if node.is_terminal() {
                return Ok(Leaf {
                    node: id,
                    expand: false,
                });
            }

            if node.stats.visits == 0 {
                return Ok(Leaf {
                    node: id,
                    expand: true,
                });
            }

            // Not expanded because of the nodes budget.
            if !node.is_expanded() {
                return Ok(Leaf {
                    node: id,
                    expand: false,
                });
            }

            let mut children = node.children();
            id = match children.find(|&c| self.arena.get(c).stats.visits == 0) {
                Some(unvisited) => unvisited,
                None => self.best_child(id)?,
            };
        }
    }

    /// Creates `width` children of a node, returns the number of children created.
    ///
    /// Terminal nodes, already expanded nodes, and nodes that would exceed the
    /// nodes budget are not expanded.
    pub fn expand(&mut self, id: NodeId) -> Result<usize, SearchError> {
        let node = *self.arena.get(id);
        let Some(reveal) = node.next_reveal() else {
            return Ok(0);
        };

        if node.is_terminal() || node.is_expanded() {
            return Ok(0);
        }

        let width = self.config.width as usize;
        if self.arena.len() + width > self.config.max_nodes {
            if !self.out_of_nodes {
                warn!(
                    "Nodes budget of {} reached, leaf nodes won't be expanded",
                    self.config.max_nodes
                );
                self.out_of_nodes = true;
            }

            return Ok(0);
        }

        self.arena.reserve(width);
        let start = self.arena.len() as NodeId;
        let mut buf = [Card::new(Rank::Ace, Suit::Spades); 3];
        let sampled = &mut buf[..reveal.cards()];

        for _ in 0..width {
            let deck = node.deck().sample_into(sampled, &mut self.rng)?;
            self.arena.push(node.child(id, reveal, sampled, deck));
        }

        let end = self.arena.len() as NodeId;
        self.arena.get_mut(id).set_children(start..end);
        Ok(width)
    }

    /// Runs a random showdown from a node.
    ///
    /// The missing opponent and community cards are sampled from the node
    /// deck, the node is not changed.
    pub fn simulate(&mut self, id: NodeId) -> Result<Showdown, SearchError> {
        let node = *self.arena.get(id);
        let mut deck = node.deck();

        let opponent = match node.opponent() {
            Some(cards) => cards,
            None => {
                let mut cards = self.hand;
                deck = deck.sample_into(&mut cards, &mut self.rng)?;
                cards
            }
        };

        let community = node.community();
        let mut hero = [self.hand[0]; 7];
        hero[..2].copy_from_slice(&self.hand);
        hero[2..2 + community.len()].copy_from_slice(community);
        deck.sample_into(&mut hero[2 + community.len()..], &mut self.rng)?;

        let mut villain = hero;
        villain[..2].copy_from_slice(&opponent);

        Ok(HandValue::eval(&hero).showdown(&HandValue::eval(&villain)))
    }

    /// Adds a showdown outcome to a node and all its ancestors.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Showdown) {
        let mut next = Some(id);
        while let Some(id) = next {
            let node = self.arena.get_mut(id);
            node.stats.record(outcome);
            next = node.parent();
        }
    }

    /// The UCB1 score of a node.
    ///
    /// Fails for a node without visits or without a visited parent, so it is
    /// never defined for the root.
    pub fn ucb1(&self, id: NodeId) -> Result<f64, SearchError> {
        let node = self.arena.get(id);
        let visits = node.stats.visits;
        let parent_visits = node
            .parent()
            .map(|p| self.arena.get(p).stats.visits)
            .unwrap_or_default();

        if visits == 0 || parent_visits == 0 {
            return Err(SearchError::DegenerateUcb1 {
                visits,
                parent_visits,
            });
        }

        let n = visits as f64;
        let exploit = node.stats.reward(self.config.tie_score) / n;
        let explore = ((parent_visits as f64).ln() / n).sqrt();
        Ok(exploit + self.config.exploration * explore)
    }

    /// The search hole cards.
    pub fn hand(&self) -> [Card; 2] {
        self.hand
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        self.arena.get(ROOT)
    }

    /// Gets a node by id.
    ///
    /// Panics if the id is not in the tree.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Iterates all the nodes in the tree.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.arena.iter()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A search tree always has the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The result from the current root statistics.
    pub fn result(&self, elapsed: Duration) -> SearchResult {
        SearchResult::new(
            self.root().stats(),
            self.len(),
            self.config.tie_score,
            elapsed,
        )
    }

    fn best_child(&self, id: NodeId) -> Result<NodeId, SearchError> {
        let mut children = self.arena.get(id).children();
        let mut best = children.next().unwrap_or(id);
        let mut best_score = self.ucb1(best)?;

        for child in children {
            let score = self.ucb1(child)?;
            if score > best_score {
                best = child;
                best_score = score;
            }
        }

        Ok(best)
    }
}

/// The search estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of showdowns.
    pub visits: u64,
    /// Number of showdowns won.
    pub wins: u64,
    /// Number of showdowns tied.
    pub ties: u64,
    /// Number of showdowns lost.
    pub losses: u64,
    /// Number of nodes in the search trees.
    pub nodes: usize,
    /// How ties are scored in the equity.
    pub tie_score: TieScore,
    /// Wins plus scored ties over visits.
    pub equity: f64,
    /// Wins over visits.
    pub win_rate: f64,
    /// Ties over visits.
    pub tie_rate: f64,
    /// Search time.
    pub elapsed: Duration,
}

impl SearchResult {
    pub(crate) fn new(stats: Stats, nodes: usize, tie_score: TieScore, elapsed: Duration) -> Self {
        let mut result = Self {
            visits: 0,
            wins: 0,
            ties: 0,
            losses: 0,
            nodes: 0,
            tie_score,
            equity: 0.0,
            win_rate: 0.0,
            tie_rate: 0.0,
            elapsed,
        };

        result.add(stats, nodes);
        result
    }

    /// Adds root statistics from another tree.
    pub(crate) fn add(&mut self, stats: Stats, nodes: usize) {
        self.visits += stats.visits as u64;
        self.wins += stats.wins as u64;
        self.ties += stats.ties as u64;
        self.losses = self.visits - self.wins - self.ties;
        self.nodes += nodes;

        if self.visits > 0 {
            let visits = self.visits as f64;
            self.win_rate = self.wins as f64 / visits;
            self.tie_rate = self.ties as f64 / visits;
            self.equity = self.win_rate + self.tie_rate * self.tie_score.value();
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: u64| 100.0 * n as f64 / self.visits.max(1) as f64;

        writeln!(f, "Equity:   {:.4} (ties score {})", self.equity, self.tie_score)?;
        writeln!(f, "Wins:     {:>9} {:6.2}%", self.wins, pct(self.wins))?;
        writeln!(f, "Ties:     {:>9} {:6.2}%", self.ties, pct(self.ties))?;
        writeln!(f, "Losses:   {:>9} {:6.2}%", self.losses, pct(self.losses))?;
        writeln!(f, "Visits:   {:>9}", self.visits)?;
        writeln!(f, "Nodes:    {:>9}", self.nodes)?;
        write!(f, "Elapsed:  {:.3}s", self.elapsed.as_secs_f64())
    }
}
