//! Per-world state shared by the section codecs.

use cursor::{ByteReader, ByteWriter};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;

/// What a section codec needs to know about the world it belongs to.
///
/// Built once the file-format header and the world header are known, then
/// passed by reference to every later section.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'w> {
    pub version: i32,
    pub importance: &'w [bool],
    pub width: usize,
    pub height: usize,
    pub limits: &'w CodecLimits,
}

impl<'w> SectionContext<'w> {
    /// Creates a context, checking the world size against `limits`.
    pub fn new(
        version: i32,
        importance: &'w [bool],
        width: i32,
        height: i32,
        limits: &'w CodecLimits,
    ) -> CodecResult<Self> {
        let width = dimension("world width", width)?;
        let height = dimension("world height", height)?;
        let tiles = width.saturating_mul(height);
        if tiles > limits.max_world_tiles {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::WorldTiles,
                limit: limits.max_world_tiles,
                actual: tiles,
            });
        }
        Ok(Self {
            version,
            importance,
            width,
            height,
            limits,
        })
    }

    /// Returns `true` if blocks of kind `id` store a sprite frame.
    #[must_use]
    pub fn is_important(&self, id: u16) -> bool {
        self.importance
            .get(usize::from(id))
            .copied()
            .unwrap_or(false)
    }

    /// Reads an `i16` record count.
    pub fn read_count_i16(&self, reader: &mut ByteReader<'_>, what: &'static str) -> CodecResult<usize> {
        let raw = reader.read_i16()?;
        self.check_records(what, i64::from(raw))
    }

    /// Reads an `i32` record count.
    pub fn read_count_i32(&self, reader: &mut ByteReader<'_>, what: &'static str) -> CodecResult<usize> {
        let raw = reader.read_i32()?;
        self.check_records(what, i64::from(raw))
    }

    /// Reads an `i32` list length, bounded by the list limit.
    pub fn read_list_len(&self, reader: &mut ByteReader<'_>, what: &'static str) -> CodecResult<usize> {
        let raw = reader.read_i32()?;
        check_count(what, i64::from(raw), LimitKind::ListLength, self.limits.max_list_len)
    }

    fn check_records(&self, what: &'static str, count: i64) -> CodecResult<usize> {
        check_count(what, count, LimitKind::Records, self.limits.max_records)
    }
}

/// Validates a stored count against a limit.
pub(crate) fn check_count(
    what: &'static str,
    count: i64,
    kind: LimitKind,
    limit: usize,
) -> CodecResult<usize> {
    let count = usize::try_from(count).map_err(|_| CodecError::InvalidCount { what, count })?;
    if count > limit {
        return Err(CodecError::LimitsExceeded {
            kind,
            limit,
            actual: count,
        });
    }
    Ok(count)
}

/// Writes `len` as an `i16` count.
pub(crate) fn write_count_i16(
    writer: &mut ByteWriter,
    what: &'static str,
    len: usize,
) -> CodecResult<()> {
    let count = i16::try_from(len).map_err(|_| CodecError::InvalidCount {
        what,
        count: i64::try_from(len).unwrap_or(i64::MAX),
    })?;
    writer.write_i16(count);
    Ok(())
}

/// Writes `len` as an `i32` count.
pub(crate) fn write_count_i32(
    writer: &mut ByteWriter,
    what: &'static str,
    len: usize,
) -> CodecResult<()> {
    let count = i32::try_from(len).map_err(|_| CodecError::InvalidCount {
        what,
        count: i64::try_from(len).unwrap_or(i64::MAX),
    })?;
    writer.write_i32(count);
    Ok(())
}

fn dimension(what: &'static str, value: i32) -> CodecResult<usize> {
    usize::try_from(value).map_err(|_| CodecError::InvalidCount {
        what,
        count: i64::from(value),
    })
}
