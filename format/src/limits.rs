//! Configurable limits for bounded header decoding.

/// File-level limits checked while reading the file-format header.
///
/// Section payload limits belong to the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum world file size in bytes.
    pub max_file_bytes: usize,

    /// Maximum number of entries in the section pointer table.
    pub max_pointers: usize,

    /// Maximum number of tile kinds in the importance table.
    pub max_importance_bits: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Large worlds with heavy building stay well under this.
            max_file_bytes: 512 * 1024 * 1024,

            // 11 in current files; leave room for newer layouts.
            max_pointers: 32,
            max_importance_bits: 4096,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_pointers: 16,
            max_importance_bits: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_file_bytes: usize::MAX,
            max_pointers: usize::MAX,
            max_importance_bits: usize::MAX,
        }
    }
}
