//! Approval: each voter approves every exit not much farther than its nearest.

use ev_core::Cell;

use crate::ballot::ExitBallot;
use crate::tally::Tally;

/// Exits with `d ≤ threshold × nearest`.  The bound is inclusive, so the
/// nearest exit is always approved.
pub fn approved(ballot: &ExitBallot, threshold: f64) -> impl Iterator<Item = Cell> + '_ {
    let limit = ballot.nearest().map_or(0.0, |(_, d)| d as f64 * threshold);
    ballot
        .exits
        .iter()
        .take_while(move |&&(_, d)| d as f64 <= limit)
        .map(|&(exit, _)| exit)
}

/// Exit with the most approvals.
pub fn elect(ballots: &[ExitBallot], threshold: f64) -> Option<Cell> {
    let mut tally = Tally::new();
    for ballot in ballots {
        for exit in approved(ballot, threshold) {
            tally.add(exit, 1.0);
        }
    }
    tally.winner()
}
