//! Simulation time.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! activation of every occupant; there is no wall-clock mapping because the
//! step budget, not elapsed seconds, bounds a run.

use std::fmt;

/// An absolute simulation tick counter, starting at `Tick::ZERO`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
