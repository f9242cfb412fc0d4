//! The file-format header that opens every world file.

use cursor::{ByteReader, ByteWriter};

use crate::error::{FormatError, FormatResult, LimitKind};
use crate::limits::Limits;
use crate::pointers::PointerSlot;
use crate::sections::pointer_count;
use crate::versions;

/// Magic written by desktop builds.
pub const MAGIC_DESKTOP: [u8; 7] = *b"relogic";

/// Magic written by mobile builds.
pub const MAGIC_MOBILE: [u8; 7] = *b"xindong";

/// File-type byte identifying a world file.
pub const FILE_TYPE_WORLD: u8 = 2;

/// Reserved bytes after the favorite flag.
pub const RESERVED_BYTES: usize = 7;

/// The build family that wrote a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Magic {
    /// `relogic`: desktop and console builds.
    #[default]
    Desktop,
    /// `xindong`: mobile builds.
    Mobile,
}

impl Magic {
    /// Parses the 7-byte magic.
    pub fn parse(bytes: [u8; 7]) -> FormatResult<Self> {
        match bytes {
            MAGIC_DESKTOP => Ok(Self::Desktop),
            MAGIC_MOBILE => Ok(Self::Mobile),
            found => Err(FormatError::InvalidMagic { found }),
        }
    }

    /// Returns the on-disk bytes.
    #[must_use]
    pub const fn bytes(self) -> [u8; 7] {
        match self {
            Self::Desktop => MAGIC_DESKTOP,
            Self::Mobile => MAGIC_MOBILE,
        }
    }
}

/// Decoded file-format header.
///
/// `pointers` holds the section offsets exactly as stored (without the
/// implicit leading 0). They are recomputed on every encode and take no
/// part in equality.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileFormatHeader {
    pub version: i32,
    pub magic: Magic,
    pub file_type: u8,
    pub revision: u32,
    pub favorite: bool,
    pub pointers: Vec<u32>,
    pub importance: Vec<bool>,
}

impl PartialEq for FileFormatHeader {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.magic == other.magic
            && self.file_type == other.file_type
            && self.revision == other.revision
            && self.favorite == other.favorite
            && self.importance == other.importance
    }
}

impl FileFormatHeader {
    /// Creates a desktop header for `version` with the given importance table.
    #[must_use]
    pub fn new(version: i32, importance: Vec<bool>) -> Self {
        Self {
            version,
            magic: Magic::Desktop,
            file_type: FILE_TYPE_WORLD,
            revision: 0,
            favorite: false,
            pointers: Vec::new(),
            importance,
        }
    }

    /// Returns `true` if a mobile build wrote the file.
    #[must_use]
    pub fn is_android(&self) -> bool {
        self.magic == Magic::Mobile
    }

    /// Returns `true` if tiles of kind `id` store a sprite frame.
    #[must_use]
    pub fn is_important(&self, id: u16) -> bool {
        self.importance
            .get(usize::from(id))
            .copied()
            .unwrap_or(false)
    }

    /// Reads the header from the start of a world file.
    ///
    /// Magic, file type and version are checked in that order before the
    /// pointer and importance tables are read.
    pub fn decode(reader: &mut ByteReader<'_>, limits: &Limits) -> FormatResult<Self> {
        if reader.len() > limits.max_file_bytes {
            return Err(FormatError::LimitsExceeded {
                kind: LimitKind::FileBytes,
                limit: limits.max_file_bytes,
                actual: reader.len(),
            });
        }

        let version = reader.read_i32()?;
        let magic = Magic::parse(reader.read_array()?)?;
        let file_type = reader.read_u8()?;
        if file_type != FILE_TYPE_WORLD {
            return Err(FormatError::InvalidFileType { found: file_type });
        }
        if version < versions::MIN_SUPPORTED {
            return Err(FormatError::UnsupportedVersion {
                found: version,
                minimum: versions::MIN_SUPPORTED,
            });
        }

        let revision = reader.read_u32()?;
        let favorite = reader.read_bool()?;
        reader.skip(RESERVED_BYTES)?;

        let pointer_len = read_count(reader, "pointer", LimitKind::PointerCount, limits.max_pointers)?;
        let pointers = (0..pointer_len)
            .map(|_| reader.read_u32())
            .collect::<Result<Vec<_>, _>>()?;

        let importance_len = read_count(
            reader,
            "importance",
            LimitKind::ImportanceBits,
            limits.max_importance_bits,
        )?;
        let importance = reader.read_bits_byte(importance_len)?;

        Ok(Self {
            version,
            magic,
            file_type,
            revision,
            favorite,
            pointers,
            importance,
        })
    }

    /// Writes the header, reserving the pointer table for later backpatching.
    pub fn encode(&self, writer: &mut ByteWriter) -> FormatResult<PointerSlot> {
        if self.version < versions::MIN_SUPPORTED {
            return Err(FormatError::UnsupportedVersion {
                found: self.version,
                minimum: versions::MIN_SUPPORTED,
            });
        }

        writer.write_i32(self.version);
        writer.write_bytes(&self.magic.bytes());
        writer.write_u8(self.file_type);
        writer.write_u32(self.revision);
        writer.write_bool(self.favorite);
        writer.skip(RESERVED_BYTES);

        let count = pointer_count(self.version);
        writer.write_i16(count_to_i16(count, "pointer")?);
        let slot = PointerSlot::reserve(writer, count);

        writer.write_i16(count_to_i16(self.importance.len(), "importance")?);
        writer.write_bits_byte(&self.importance);
        Ok(slot)
    }
}

fn read_count(
    reader: &mut ByteReader<'_>,
    what: &'static str,
    kind: LimitKind,
    limit: usize,
) -> FormatResult<usize> {
    let raw = reader.read_i16()?;
    let count = usize::try_from(raw).map_err(|_| FormatError::InvalidCount {
        what,
        count: i64::from(raw),
    })?;
    if count > limit {
        return Err(FormatError::LimitsExceeded {
            kind,
            limit,
            actual: count,
        });
    }
    Ok(count)
}

fn count_to_i16(count: usize, what: &'static str) -> FormatResult<i16> {
    i16::try_from(count).map_err(|_| FormatError::InvalidCount {
        what,
        count: i64::try_from(count).unwrap_or(i64::MAX),
    })
}
