//! Score accumulation.

use std::collections::BTreeMap;

use ev_core::Cell;

/// Running score per exit.
#[derive(Default, Debug)]
pub struct Tally {
    scores: BTreeMap<Cell, f64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, exit: Cell, points: f64) {
        *self.scores.entry(exit).or_insert(0.0) += points;
    }

    pub fn score(&self, exit: Cell) -> f64 {
        self.scores.get(&exit).copied().unwrap_or(0.0)
    }

    /// Highest-scoring exit; the lowest cell among equal scores.  `None` when
    /// nothing was scored.
    pub fn winner(&self) -> Option<Cell> {
        let mut best: Option<(Cell, f64)> = None;
        for (&exit, &score) in &self.scores {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((exit, score)),
            }
        }
        best.map(|(exit, _)| exit)
    }
}
