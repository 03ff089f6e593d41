//! Observable loop state.

use std::fmt;

/// Where the simulation currently is within its lifecycle.
///
/// ```text
/// Setup → Negotiating → Clustering → Voting → Stepping ─┬→ Negotiating …
///                                                        └→ Terminated
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Setup,
    Negotiating,
    Clustering,
    Voting,
    Stepping,
    Terminated,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Setup       => "setup",
            Phase::Negotiating => "negotiating",
            Phase::Clustering  => "clustering",
            Phase::Voting      => "voting",
            Phase::Stepping    => "stepping",
            Phase::Terminated  => "terminated",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
