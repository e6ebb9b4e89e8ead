// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equitree CLI, estimates the equity of two hole cards against a random hand.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use equitree_mcts::{Card, Search, SearchConfig, TieScore, par_run};

#[derive(Debug, Parser)]
#[clap(about = "Estimates a poker hand equity against a random opponent hand")]
struct Cli {
    /// The two hole cards, e.g. AD 10H.
    #[clap(required = true, num_args = 1..)]
    hand: Vec<String>,
    /// The known community cards, 0, 3, 4, or 5 cards.
    #[clap(long, short, default_value = "")]
    board: String,
    /// Number of search iterations.
    #[clap(long, short, default_value_t = SearchConfig::ITERATIONS,
           value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,
    /// Number of children created when a node is expanded.
    #[clap(long, short, default_value_t = SearchConfig::WIDTH,
           value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    /// Maximum number of nodes in the search tree.
    #[clap(long, default_value_t = SearchConfig::MAX_NODES as u32,
           value_parser = clap::value_parser!(u32).range(1..))]
    max_nodes: u32,
    /// How a tie is scored: win, split, or loss.
    #[clap(long, default_value_t = TieScore::Win)]
    tie: TieScore,
    /// Seed for a reproducible search.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Number of parallel searches.
    #[clap(long, short, default_value_t = 1,
           value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: u16,
    /// Print the result as JSON.
    #[clap(long)]
    json: bool,
    /// Enable debug logging.
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            width: self.width,
            max_nodes: self.max_nodes as usize,
            tie_score: self.tie,
            seed: self.seed,
            ..Default::default()
        }
    }
}

/// Parses the hole cards and the board checking no card is repeated.
fn parse_deal(hand: &[String], board: &str) -> Result<([Card; 2], Vec<Card>)> {
    let hand = Card::parse_many(&hand.join(" "))?;
    let [c1, c2] = hand[..] else {
        bail!("expected 2 hole cards, got {}", hand.len());
    };

    let board = Card::parse_many(board)?;
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        bail!("expected 0, 3, 4, or 5 board cards, got {}", board.len());
    }

    if let Some(card) = board.iter().find(|&&c| c == c1 || c == c2) {
        bail!("card {card} is both in the hand and on the board");
    }

    Ok(([c1, c2], board))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    // Reject invalid input before doing any work.
    let (hand, board) = parse_deal(&cli.hand, &cli.board)?;
    let config = cli.config();
    config.validate()?;

    info!("Hand {} {} board {:?}", hand[0], hand[1], board);

    let result = if cli.tasks > 1 {
        par_run(hand, &board, &config, cli.tasks as usize)?
    } else {
        Search::with_board(hand, &board, config)?.run()?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["equitree", "AD", "10H"]).unwrap();
        let config = cli.config();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(cli.tasks, 1);

        let cli = Cli::try_parse_from(["equitree", "AD", "10H", "-i", "0"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["equitree", "AD", "10H", "--tie", "draw"]);
        assert!(cli.is_err());

        let cli =
            Cli::try_parse_from(["equitree", "AD", "10H", "--tie", "split", "-s", "3"]).unwrap();
        assert_eq!(cli.config().tie_score, TieScore::Split);
        assert_eq!(cli.config().seed, Some(3));
    }

    #[test]
    fn parse_valid_deals() {
        let (hand, board) = parse_deal(&args("AD 10H"), "").unwrap();
        assert_eq!(hand[0].to_string(), "AD");
        assert_eq!(hand[1].to_string(), "10H");
        assert!(board.is_empty());

        let (_, board) = parse_deal(&args("AD,10H"), "2C 3C 4C").unwrap();
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn parse_invalid_deals() {
        assert!(parse_deal(&args("AD"), "").is_err());
        assert!(parse_deal(&args("AD KD QD"), "").is_err());
        assert!(parse_deal(&args("AD 1H"), "").is_err());
        assert!(parse_deal(&args("AD AD"), "").is_err());
        assert!(parse_deal(&args("AD KD"), "2C 3C").is_err());
        assert!(parse_deal(&args("AD KD"), "2C 3C AD").is_err());
    }
}
