//! Cumulative: each voter spreads a fixed budget over all its exits.

use ev_core::Cell;

use crate::ballot::{inverse, ExitBallot};
use crate::tally::Tally;

/// Points per exit, proportional to 1/d and summing to `budget`.
pub fn distribute_points(ballot: &ExitBallot, budget: f64) -> Vec<(Cell, f64)> {
    let total: f64 = ballot.exits.iter().map(|&(_, d)| inverse(d)).sum();
    if total <= 0.0 {
        return vec![];
    }
    ballot
        .exits
        .iter()
        .map(|&(exit, d)| (exit, budget * inverse(d) / total))
        .collect()
}

/// Exit with the highest point total.
pub fn elect(ballots: &[ExitBallot], budget: f64) -> Option<Cell> {
    let mut tally = Tally::new();
    for ballot in ballots {
        for (exit, points) in distribute_points(ballot, budget) {
            tally.add(exit, points);
        }
    }
    tally.winner()
}
