//! Version predicates deciding whether a field is stored.

/// A predicate over the format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VersionGate {
    /// Present at every version.
    #[default]
    Always,
    /// Present when `version < n`.
    Before(i32),
    /// Present when `version == n`.
    Exactly(i32),
    /// Present when `version >= n`.
    Since(i32),
    /// Present when `version > n`.
    After(i32),
    /// Present when `since <= version < before`.
    Between { since: i32, before: i32 },
}

impl VersionGate {
    /// Returns `true` if a field behind this gate is stored at `version`.
    #[must_use]
    pub const fn admits(self, version: i32) -> bool {
        match self {
            Self::Always => true,
            Self::Before(n) => version < n,
            Self::Exactly(n) => version == n,
            Self::Since(n) => version >= n,
            Self::After(n) => version > n,
            Self::Between { since, before } => since <= version && version < before,
        }
    }
}
