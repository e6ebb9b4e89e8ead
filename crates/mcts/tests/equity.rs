// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use equitree_mcts::*;

fn hand(s: &str) -> [Card; 2] {
    let cards = Card::parse_many(s).unwrap();
    [cards[0], cards[1]]
}

fn equity(s: &str) -> f64 {
    let config = SearchConfig {
        seed: Some(2025),
        ..Default::default()
    };
    assert_eq!(config.width, SearchConfig::WIDTH);

    let mut search = Search::new(hand(s), config).unwrap();
    let result = search.run().unwrap();
    assert_eq!(result.visits, 20_000);
    assert_eq!(search.root().stats().visits, 20_000);
    result.equity
}

#[test]
fn strong_hands_have_higher_equity() {
    let aces = equity("AH AS");
    let seven_deuce = equity("7C 2D");

    assert!((0.80..0.90).contains(&aces), "aces equity {aces}");
    assert!(seven_deuce < 0.5, "72o equity {seven_deuce}");
    assert!(aces - seven_deuce > 0.3);
}

#[test]
fn river_equity_against_made_hand() {
    // The nut flush can't be beaten on this board.
    let board = Card::parse_many("2H 7H 9H KC 3D").unwrap();
    let config = SearchConfig {
        iterations: 2_000,
        width: 100,
        seed: Some(1),
        ..Default::default()
    };

    let result = par_run(hand("AH QH"), &board, &config, 2).unwrap();
    assert_eq!(result.visits, 2_000);
    assert_eq!(result.equity, 1.0);
    assert_eq!(result.losses, 0);
}
