//! Plurality: each voter casts one vote, sampled by preference.

use rand::distributions::{Distribution, WeightedIndex};

use ev_core::{Cell, SimRng};

use crate::ballot::{inverse, ExitBallot};
use crate::tally::Tally;

/// Sample one exit from `ballot` with probability ∝ (1/d)^`steepness`.
///
/// Larger `steepness` concentrates the vote on the nearest exit; 0 makes every
/// reachable exit equally likely.  Falls back to the nearest exit if the
/// weights underflow.
pub fn sample_exit(ballot: &ExitBallot, steepness: f64, rng: &mut SimRng) -> Option<Cell> {
    let (nearest, _) = ballot.nearest()?;
    if ballot.exits.len() == 1 {
        return Some(nearest);
    }
    let weights = ballot.exits.iter().map(|&(_, d)| inverse(d).powf(steepness));
    match WeightedIndex::new(weights) {
        Ok(dist) => Some(ballot.exits[dist.sample(rng.inner())].0),
        Err(_) => Some(nearest),
    }
}

/// Most sampled exit across `ballots`.
pub fn elect(ballots: &[ExitBallot], steepness: f64, rng: &mut SimRng) -> Option<Cell> {
    let mut tally = Tally::new();
    for ballot in ballots {
        if let Some(exit) = sample_exit(ballot, steepness, rng) {
            tally.add(exit, 1.0);
        }
    }
    tally.winner()
}
