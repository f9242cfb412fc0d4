//! Limits for section decoding.

/// Codec-specific limits enforced while decoding and encoding sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of tiles (width times height) in a world.
    pub max_world_tiles: usize,
    /// Maximum number of records in an entity section.
    pub max_records: usize,
    /// Maximum number of elements in a header or bestiary list.
    pub max_list_len: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            // A large world is 8400x2400.
            max_world_tiles: 8400 * 2400,
            max_records: 64 * 1024,
            max_list_len: 64 * 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_world_tiles: 64 * 64,
            max_records: 256,
            max_list_len: 256,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_world_tiles: usize::MAX,
            max_records: usize::MAX,
            max_list_len: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_fit_a_large_world() {
        let limits = CodecLimits::default();
        assert!(limits.max_world_tiles >= 8400 * 2400);
        assert!(limits.max_records >= 1000);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_world_tiles < default_limits.max_world_tiles);
        assert!(test_limits.max_records < default_limits.max_records);
        assert!(test_limits.max_list_len < default_limits.max_list_len);
    }

    #[test]
    fn unlimited_limits() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_world_tiles, usize::MAX);
        assert_eq!(limits.max_list_len, usize::MAX);
    }
}
