//! Error types for file-format operations.

use std::fmt;

use cursor::CursorError;

use crate::sections::SectionKind;

/// Result type for file-format operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while reading or writing the file-format header and
/// section pointer table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// The header prefix could not be read.
    Cursor(CursorError),

    /// The 7-byte magic is neither known literal.
    InvalidMagic { found: [u8; 7] },

    /// The file-type byte is not the world-file constant.
    InvalidFileType { found: u8 },

    /// The format version is older than the oldest supported one.
    UnsupportedVersion { found: i32, minimum: i32 },

    /// A length field is negative.
    InvalidCount { what: &'static str, count: i64 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A section name did not match any known section.
    UnknownSection { name: String },

    /// No pointer was recorded for a section the layout requires.
    MissingPointer { section: SectionKind, index: usize },

    /// A section did not end at the next recorded pointer.
    SectionBoundary {
        section: SectionKind,
        expected: usize,
        found: usize,
    },

    /// The number of offsets to backpatch differs from the reserved slots.
    PointerCountMismatch { reserved: usize, actual: usize },

    /// A section offset does not fit a 32-bit pointer.
    PointerOverflow { offset: usize },
}

/// Specific file-format limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FileBytes,
    PointerCount,
    ImportanceBits,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(err) => write!(f, "truncated file-format header: {err}"),
            Self::InvalidMagic { found } => {
                write!(f, "invalid file type: magic {:?}", String::from_utf8_lossy(found))
            }
            Self::InvalidFileType { found } => {
                write!(f, "invalid file type: type byte {found}")
            }
            Self::UnsupportedVersion { found, minimum } => {
                write!(
                    f,
                    "unsupported format version {found}, oldest supported is {minimum}"
                )
            }
            Self::InvalidCount { what, count } => {
                write!(f, "invalid {what} count: {count}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::UnknownSection { name } => write!(f, "unknown section name: {name:?}"),
            Self::MissingPointer { section, index } => {
                write!(f, "no pointer recorded for {section} section (index {index})")
            }
            Self::SectionBoundary {
                section,
                expected,
                found,
            } => {
                write!(
                    f,
                    "bad {section} section end offset: ended at {found}, expected {expected}"
                )
            }
            Self::PointerCountMismatch { reserved, actual } => {
                write!(
                    f,
                    "pointer table reserved {reserved} slots but {actual} offsets were recorded"
                )
            }
            Self::PointerOverflow { offset } => {
                write!(f, "section offset {offset} does not fit a 32-bit pointer")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileBytes => "file bytes",
            Self::PointerCount => "pointer count",
            Self::ImportanceBits => "importance bits",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cursor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CursorError> for FormatError {
    fn from(err: CursorError) -> Self {
        Self::Cursor(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_magic() {
        let err = FormatError::InvalidMagic { found: *b"notwrld" };
        let msg = err.to_string();
        assert!(msg.contains("invalid file type"));
        assert!(msg.contains("notwrld"));
    }

    #[test]
    fn display_section_boundary() {
        let err = FormatError::SectionBoundary {
            section: SectionKind::Tiles,
            expected: 120,
            found: 122,
        };
        let msg = err.to_string();
        assert!(msg.contains("bad tiles section end offset"));
        assert!(msg.contains("120"));
        assert!(msg.contains("122"));
    }

    #[test]
    fn display_limits_exceeded() {
        let err = FormatError::LimitsExceeded {
            kind: LimitKind::PointerCount,
            limit: 32,
            actual: 300,
        };
        let msg = err.to_string();
        assert!(msg.contains("pointer count"));
        assert!(msg.contains("300"));
    }

    #[test]
    fn cursor_errors_are_sources() {
        use std::error::Error;
        let err = FormatError::from(CursorError::InvalidUtf8 { offset: 3 });
        assert!(err.source().is_some());
        assert!(FormatError::InvalidFileType { found: 1 }.source().is_none());
    }
}
