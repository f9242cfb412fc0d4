//! Error types for world decoding and encoding.

use std::fmt;

use cursor::CursorError;
use format::{FormatError, SectionKind};

/// Result type for section codecs.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for whole-world operations.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors raised while decoding or encoding world sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Cursor error.
    Cursor(CursorError),

    /// File-format header or pointer table error.
    Format(FormatError),

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A stored count is negative or does not fit its on-disk width.
    InvalidCount { what: &'static str, count: i64 },

    /// A tile run extends past the bottom of its column.
    TileRunOverflow { x: usize, y: usize, run: usize },

    /// A tile entity carries an unknown type tag.
    UnknownTileEntityKind { tag: u8 },

    /// A creative power record carries an unknown id.
    UnknownCreativePower { id: i16 },

    /// A legacy NPC record names a character missing from the name table.
    UnknownNpcName { name: String },

    /// An NPC id has no legacy name to be written under.
    UnmappedNpcId { id: i32 },

    /// A header field required at the target version is missing.
    MissingField { name: &'static str },

    /// A header field holds a value of the wrong type.
    FieldTypeMismatch {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A fixed-size header field has the wrong length.
    FieldLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The tile grid does not match the header's dimensions.
    GridSizeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    /// A value cannot be represented at the target version.
    UnsupportedForVersion { feature: &'static str, version: i32 },

    /// A value does not fit its on-disk representation.
    ValueOutOfRange { what: &'static str, value: i64 },

    /// A chest item sits in a slot the format cannot store.
    ChestSlotOutOfRange { slot: u16, slots: u16 },

    /// The footer disagrees with the header.
    FooterMismatch { field: &'static str },
}

/// Specific codec limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    WorldTiles,
    Records,
    ListLength,
}

/// The phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the file-format header and checking the version.
    Loading,
    /// Decoding sections.
    Parsing,
    /// Encoding sections.
    Saving,
}

/// Coarse classification of a [`WorldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad magic, bad file type, or an unreadable prefix.
    MalformedHeader,
    /// Format version below the supported minimum.
    UnsupportedVersion,
    /// A section did not end where the pointer table says the next begins.
    SectionBoundaryMismatch,
    /// A read or write ran past the buffer.
    OutOfRange,
    /// Structurally invalid section payload or model.
    InvalidData,
}

/// A codec failure tagged with the stage it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldError {
    pub stage: Stage,
    pub error: CodecError,
}

impl WorldError {
    /// Wraps `error` with `stage`.
    pub fn new(stage: Stage, error: impl Into<CodecError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }

    /// Classifies the underlying cause.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match &self.error {
            CodecError::Format(FormatError::UnsupportedVersion { .. }) => {
                ErrorKind::UnsupportedVersion
            }
            CodecError::Format(
                FormatError::InvalidMagic { .. }
                | FormatError::InvalidFileType { .. }
                | FormatError::MissingPointer { .. },
            ) => ErrorKind::MalformedHeader,
            CodecError::Format(FormatError::SectionBoundary { .. }) => {
                ErrorKind::SectionBoundaryMismatch
            }
            CodecError::Format(FormatError::Cursor(_)) | CodecError::Cursor(_)
                if matches!(self.stage, Stage::Loading) =>
            {
                ErrorKind::MalformedHeader
            }
            CodecError::Format(FormatError::Cursor(CursorError::OutOfRange { .. }))
            | CodecError::Cursor(CursorError::OutOfRange { .. }) => ErrorKind::OutOfRange,
            _ => ErrorKind::InvalidData,
        }
    }

    /// Returns the section named by a boundary error.
    #[must_use]
    pub const fn section(&self) -> Option<SectionKind> {
        match &self.error {
            CodecError::Format(
                FormatError::SectionBoundary { section, .. }
                | FormatError::MissingPointer { section, .. },
            ) => Some(*section),
            _ => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(e) => write!(f, "cursor error: {e}"),
            Self::Format(e) => write!(f, "format error: {e}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::InvalidCount { what, count } => write!(f, "invalid {what} count {count}"),
            Self::TileRunOverflow { x, y, run } => {
                write!(f, "tile run of {run} at ({x}, {y}) overflows its column")
            }
            Self::UnknownTileEntityKind { tag } => write!(f, "unknown tile entity tag {tag}"),
            Self::UnknownCreativePower { id } => write!(f, "unknown creative power id {id}"),
            Self::UnknownNpcName { name } => write!(f, "unknown legacy NPC name {name:?}"),
            Self::UnmappedNpcId { id } => write!(f, "NPC id {id} has no legacy name"),
            Self::MissingField { name } => write!(f, "missing header field {name:?}"),
            Self::FieldTypeMismatch {
                name,
                expected,
                found,
            } => {
                write!(f, "header field {name:?}: expected {expected} but got {found}")
            }
            Self::FieldLength {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "header field {name:?}: expected {expected} elements, got {actual}"
                )
            }
            Self::GridSizeMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => {
                write!(
                    f,
                    "tile grid is {width}x{height}, header says {expected_width}x{expected_height}"
                )
            }
            Self::UnsupportedForVersion { feature, version } => {
                write!(f, "{feature} cannot be stored at version {version}")
            }
            Self::ValueOutOfRange { what, value } => write!(f, "{what} {value} out of range"),
            Self::ChestSlotOutOfRange { slot, slots } => {
                write!(f, "chest slot {slot} out of range (chests hold {slots})")
            }
            Self::FooterMismatch { field } => write!(f, "footer {field} does not match header"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WorldTiles => "world tiles",
            Self::Records => "records",
            Self::ListLength => "list length",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Parsing => "parsing",
            Self::Saving => "saving",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world {} failed: {}", self.stage, self.error)
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cursor(e) => Some(e),
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<CursorError> for CodecError {
    fn from(err: CursorError) -> Self {
        Self::Cursor(err)
    }
}

impl From<FormatError> for CodecError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}
