// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::SearchError;

/// How a tie counts toward the searching player reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieScore {
    /// A tie counts as a win.
    #[default]
    Win,
    /// A tie counts as half a win.
    Split,
    /// A tie counts as a loss.
    Loss,
}

impl TieScore {
    /// The reward for a tie.
    pub fn value(&self) -> f64 {
        match self {
            TieScore::Win => 1.0,
            TieScore::Split => 0.5,
            TieScore::Loss => 0.0,
        }
    }
}

impl fmt::Display for TieScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TieScore::Win => "win",
            TieScore::Split => "split",
            TieScore::Loss => "loss",
        };

        write!(f, "{s}")
    }
}

impl FromStr for TieScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win" => Ok(TieScore::Win),
            "split" => Ok(TieScore::Split),
            "loss" => Ok(TieScore::Loss),
            _ => Err(format!("invalid tie score '{s}', expected win, split, or loss")),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of iterations, each iteration runs one showdown.
    pub iterations: u32,
    /// Number of children created when a node is expanded.
    pub width: u32,
    /// Maximum number of nodes in the tree.
    ///
    /// Every expansion allocates `width` nodes, nodes that would exceed this
    /// budget are not expanded and are scored by simulating from them.
    pub max_nodes: usize,
    /// The UCB1 exploration constant.
    pub exploration: f64,
    /// How ties are scored.
    pub tie_score: TieScore,
    /// Seed for reproducible runs, a random seed is used if `None`.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Default number of iterations.
    pub const ITERATIONS: u32 = 20_000;
    /// Default expansion width.
    pub const WIDTH: u32 = 1_000;
    /// Default nodes budget.
    pub const MAX_NODES: usize = 2_000_000;

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfig("iterations must be > 0"));
        }

        if self.width == 0 {
            return Err(SearchError::InvalidConfig("width must be > 0"));
        }

        if self.max_nodes == 0 || self.max_nodes > u32::MAX as usize {
            return Err(SearchError::InvalidConfig(
                "max_nodes must be > 0 and fit in 32 bits",
            ));
        }

        if !(self.exploration.is_finite() && self.exploration >= 0.0) {
            return Err(SearchError::InvalidConfig(
                "exploration must be finite and >= 0",
            ));
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: Self::ITERATIONS,
            width: Self::WIDTH,
            max_nodes: Self::MAX_NODES,
            exploration: std::f64::consts::SQRT_2,
            tie_score: TieScore::Win,
            seed: None,
        }
    }
}
