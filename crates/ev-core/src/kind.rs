//! Occupant kinds.

/// Whether an occupant can walk on its own and assist others.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OccupantKind {
    /// Moves at the configured helper speed and carries a willingness scalar.
    #[default]
    Helper,
    /// Immobile (speed 0) until paired with a helper.
    Dependent,
}

impl OccupantKind {
    #[inline]
    pub fn is_helper(self) -> bool {
        matches!(self, OccupantKind::Helper)
    }

    /// Human-readable label, used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            OccupantKind::Helper    => "helper",
            OccupantKind::Dependent => "dependent",
        }
    }
}

impl std::fmt::Display for OccupantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
