// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Root parallel search.
use log::{debug, info};
use rand::prelude::*;
use std::{thread, time::Instant};

use equitree_cards::Card;

use crate::{Search, SearchConfig, SearchError, SearchResult, node::Stats};

/// Runs `num_tasks` independent searches in parallel and sums their root statistics.
///
/// Each task builds its own tree with its own generator, seeded from the
/// config seed plus the task id, and runs its share of the iterations. The
/// nodes budget is split between the tasks.
pub fn par_run(
    hand: [Card; 2],
    board: &[Card],
    config: &SearchConfig,
    num_tasks: usize,
) -> Result<SearchResult, SearchError> {
    config.validate()?;

    if num_tasks == 0 {
        return Err(SearchError::InvalidConfig("number of tasks must be > 0"));
    }

    // Don't start tasks without iterations.
    let num_tasks = num_tasks.min(config.iterations as usize);
    let iterations_per_task = config.iterations / num_tasks as u32;
    let remainder = config.iterations as usize % num_tasks;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    info!(
        "Searching {}{} with {} tasks, iterations {} width {}",
        hand[0], hand[1], num_tasks, config.iterations, config.width
    );

    let now = Instant::now();
    let results = thread::scope(|s| {
        let handles = (0..num_tasks)
            .map(|task_id| {
                let config = SearchConfig {
                    iterations: iterations_per_task + u32::from(task_id < remainder),
                    max_nodes: (config.max_nodes / num_tasks).max(1),
                    seed: Some(seed.wrapping_add(task_id as u64)),
                    ..config.clone()
                };

                s.spawn(move || {
                    let mut search = Search::with_board(hand, board, config)?;
                    let result = search.run()?;
                    debug!("Task {task_id} done {} visits", result.visits);
                    Ok::<_, SearchError>((search.root().stats(), search.len()))
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .enumerate()
            .map(|(task_id, handle)| {
                handle
                    .join()
                    .map_err(|_| SearchError::TaskPanicked(task_id))?
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut result = SearchResult::new(Stats::default(), 0, config.tie_score, now.elapsed());
    for (stats, nodes) in results {
        result.add(stats, nodes);
    }

    info!(
        "Search done equity {:.4} nodes {} elapsed {:.3}s",
        result.equity,
        result.nodes,
        result.elapsed.as_secs_f64()
    );

    Ok(result)
}
