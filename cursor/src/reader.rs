//! Little-endian byte reader with a movable offset.

use crate::bits::{packed_len, unpack_bits};
use crate::error::{CursorError, CursorResult};
use crate::progress::Progress;

/// Longest 7-bit encoded length prefix the game writes.
const MAX_PREFIX_BYTES: usize = 5;

/// A byte reader over an in-memory buffer.
///
/// All reads are bounds-checked and advance the offset by the width of the
/// value. The offset can also be moved with [`jump`](Self::jump) so callers
/// can seek to recorded section pointers.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    progress: Option<Progress<'a>>,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at offset 0.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            progress: None,
        }
    }

    /// Creates a reader that reports whole-percent progress of its offset.
    pub fn with_progress(data: &'a [u8], callback: &'a mut dyn FnMut(u8)) -> Self {
        Self {
            data,
            pos: 0,
            progress: Some(Progress::new(data.len(), callback)),
        }
    }

    /// Returns the buffer length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left after the current offset.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Moves the offset to `offset`. The end of the buffer is a valid target.
    pub fn jump(&mut self, offset: usize) -> CursorResult<()> {
        if offset > self.data.len() {
            return Err(CursorError::OutOfRange {
                offset,
                requested: 0,
                len: self.data.len(),
            });
        }
        self.set_position(offset);
        Ok(())
    }

    /// Advances the offset by `count` bytes.
    pub fn skip(&mut self, count: usize) -> CursorResult<()> {
        self.take(count).map(|_| ())
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> CursorResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> CursorResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> CursorResult<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> CursorResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a little-endian `f32`.
    pub fn read_f32(&mut self) -> CursorResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads a little-endian `f64`.
    pub fn read_f64(&mut self) -> CursorResult<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> CursorResult<&'a [u8]> {
        self.take(count)
    }

    /// Reads a 7-bit encoded length prefix.
    ///
    /// Lengths below 128 take a single byte.
    pub fn read_length_prefix(&mut self) -> CursorResult<usize> {
        let start = self.pos;
        let mut value = 0usize;
        for index in 0..MAX_PREFIX_BYTES {
            let byte = self.read_u8()?;
            value |= usize::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CursorError::InvalidLengthPrefix { offset: start })
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> CursorResult<String> {
        let len = self.read_length_prefix()?;
        self.read_fixed_string(len)
    }

    /// Reads a UTF-8 string of exactly `len` bytes.
    pub fn read_fixed_string(&mut self, len: usize) -> CursorResult<String> {
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CursorError::InvalidUtf8 { offset })
    }

    /// Reads `size` flags packed least-significant-bit first.
    pub fn read_bits_byte(&mut self, size: usize) -> CursorResult<Vec<bool>> {
        let bytes = self.take(packed_len(size))?;
        Ok(unpack_bits(bytes, size))
    }

    fn take(&mut self, count: usize) -> CursorResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|end| *end <= self.data.len())
            .ok_or(CursorError::OutOfRange {
                offset: self.pos,
                requested: count,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.set_position(end);
        Ok(bytes)
    }

    fn set_position(&mut self, pos: usize) {
        self.pos = pos;
        if let Some(progress) = self.progress.as_mut() {
            progress.update(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reader() {
        let reader = ByteReader::new(&[1, 2, 3]);
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), 3);
        assert!(!reader.is_empty());
    }

    #[test]
    fn integers_are_little_endian() {
        let data = [0x34, 0x12, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn floats() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&(-0.25f64).to_le_bytes());
        let mut reader = ByteReader::new(&data);
        assert!((reader.read_f32().unwrap() - 1.5).abs() < f32::EPSILON);
        assert!((reader.read_f64().unwrap() + 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn bool_is_any_non_zero() {
        let mut reader = ByteReader::new(&[0, 1, 7]);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn read_past_end_fails_without_moving() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.skip(2).unwrap();
        let err = reader.read_u16().unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfRange {
                offset: 2,
                requested: 2,
                len: 3
            }
        );
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn jump_to_end_is_allowed() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.jump(3).unwrap();
        assert_eq!(reader.remaining(), 0);
        assert!(reader.jump(4).is_err());
        reader.jump(1).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 2);
    }

    #[test]
    fn short_string() {
        let mut reader = ByteReader::new(b"\x05hello!");
        assert_eq!(reader.read_string().unwrap(), "hello");
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn long_string_uses_continuation_byte() {
        let text = "a".repeat(200);
        let mut data = vec![0xC8, 0x01];
        data.extend_from_slice(text.as_bytes());
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), text);
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let mut reader = ByteReader::new(&[2, 0xFF, 0xFE]);
        assert_eq!(
            reader.read_string().unwrap_err(),
            CursorError::InvalidUtf8 { offset: 1 }
        );
    }

    #[test]
    fn runaway_length_prefix() {
        let mut reader = ByteReader::new(&[0xFF; 8]);
        assert_eq!(
            reader.read_length_prefix().unwrap_err(),
            CursorError::InvalidLengthPrefix { offset: 0 }
        );
    }

    #[test]
    fn bits_byte_reads_rounded_up_bytes() {
        let mut reader = ByteReader::new(&[0b0000_0011, 0b0000_0001, 0xAA]);
        let bits = reader.read_bits_byte(9).unwrap();
        assert_eq!(bits.len(), 9);
        assert!(bits[0] && bits[1] && bits[8]);
        assert!(!bits[2]);
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn progress_follows_offset() {
        let data = vec![0u8; 400];
        let mut seen = Vec::new();
        let mut record = |percent: u8| seen.push(percent);
        let mut reader = ByteReader::with_progress(&data, &mut record);
        reader.skip(8).unwrap();
        reader.read_u32().unwrap();
        drop(reader);
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
