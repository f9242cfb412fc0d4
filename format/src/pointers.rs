//! Section pointer table: seeking on decode, backpatching on encode.

use cursor::ByteWriter;

use crate::error::{FormatError, FormatResult};
use crate::sections::SectionKind;

/// Absolute section start offsets read from a world file.
///
/// Entry 0 is the file-format header itself and is always 0; entry `i`
/// is the start of the `i`-th section of the version's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerTable {
    starts: Vec<usize>,
}

impl PointerTable {
    /// Builds the table from the pointers stored after the header prefix.
    #[must_use]
    pub fn new(pointers: &[u32]) -> Self {
        let starts = std::iter::once(0)
            .chain(pointers.iter().map(|&pointer| pointer as usize))
            .collect();
        Self { starts }
    }

    /// Returns the number of entries, including the implicit leading 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Always `false`: the implicit first entry is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Returns the recorded start of the section at `index`.
    #[must_use]
    pub fn start(&self, index: usize) -> Option<usize> {
        self.starts.get(index).copied()
    }

    /// Returns the start of `section` at `index`, or an error if the table
    /// is too short.
    pub fn require_start(&self, section: SectionKind, index: usize) -> FormatResult<usize> {
        self.start(index)
            .ok_or(FormatError::MissingPointer { section, index })
    }

    /// Checks that a section ended where the next one starts.
    ///
    /// The end of the buffer is also accepted, which covers the last
    /// section.
    pub fn check_end(
        &self,
        section: SectionKind,
        index: usize,
        offset: usize,
        buf_len: usize,
    ) -> FormatResult<()> {
        let next = self.start(index + 1);
        if next == Some(offset) || offset == buf_len {
            return Ok(());
        }
        Err(FormatError::SectionBoundary {
            section,
            expected: next.unwrap_or(buf_len),
            found: offset,
        })
    }
}

/// A pointer table region reserved in an output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSlot {
    offset: usize,
    count: usize,
}

impl PointerSlot {
    /// Reserves `count` zeroed 32-bit pointers at the writer's offset.
    pub fn reserve(writer: &mut ByteWriter, count: usize) -> Self {
        let offset = writer.position();
        writer.skip(count * 4);
        Self { offset, count }
    }

    /// Returns the offset of the first reserved pointer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of reserved pointers.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Writes the final section offsets into the reserved region.
    ///
    /// The writer's offset is restored afterwards.
    pub fn backpatch(&self, writer: &mut ByteWriter, offsets: &[usize]) -> FormatResult<()> {
        if offsets.len() != self.count {
            return Err(FormatError::PointerCountMismatch {
                reserved: self.count,
                actual: offsets.len(),
            });
        }
        let pointers = offsets
            .iter()
            .map(|&offset| {
                u32::try_from(offset).map_err(|_| FormatError::PointerOverflow { offset })
            })
            .collect::<FormatResult<Vec<_>>>()?;

        let resume = writer.position();
        writer.jump(self.offset)?;
        for pointer in pointers {
            writer.write_u32(pointer);
        }
        writer.jump(resume)?;
        Ok(())
    }
}
