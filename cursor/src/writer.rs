//! Little-endian byte writer with a movable offset.

use crate::bits::pack_bits;
use crate::error::{CursorError, CursorResult};

/// Largest length a 7-bit encoded prefix may carry.
const MAX_PREFIXED_LEN: usize = i32::MAX as usize;

/// A growable byte writer.
///
/// Writes overwrite bytes at the current offset and extend the buffer when
/// they pass its end, so a region can be reserved with [`skip`](Self::skip)
/// and filled in later after a [`jump`](Self::jump) back.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
    pos: usize,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            pos: 0,
        }
    }

    /// Returns the current offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes written so far (the high-water mark).
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Moves the offset to an already written position or the end.
    pub fn jump(&mut self, offset: usize) -> CursorResult<()> {
        if offset > self.buf.len() {
            return Err(CursorError::OutOfRange {
                offset,
                requested: 0,
                len: self.buf.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Advances the offset by `count` bytes, zero-filling new space.
    pub fn skip(&mut self, count: usize) {
        let end = self.pos + count;
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.pos = end;
    }

    /// Writes a `u8`.
    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    /// Writes a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.put(&value.to_le_bytes());
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) {
        self.put(&value.to_le_bytes());
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.put(&value.to_le_bytes());
    }

    /// Writes a little-endian `f32`.
    pub fn write_f32(&mut self, value: f32) {
        self.put(&value.to_le_bytes());
    }

    /// Writes a little-endian `f64`.
    pub fn write_f64(&mut self, value: f64) {
        self.put(&value.to_le_bytes());
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Writes a 7-bit encoded length prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::LengthOverflow`] if `len` exceeds `i32::MAX`.
    pub fn write_length_prefix(&mut self, len: usize) -> CursorResult<()> {
        if len > MAX_PREFIXED_LEN {
            return Err(CursorError::LengthOverflow { length: len });
        }
        let mut value = len;
        while value >= 0x80 {
            // Masked to seven bits, so the cast is lossless.
            #[allow(clippy::cast_possible_truncation)]
            self.write_u8((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        #[allow(clippy::cast_possible_truncation)]
        self.write_u8(value as u8);
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> CursorResult<()> {
        self.write_length_prefix(value.len())?;
        self.put(value.as_bytes());
        Ok(())
    }

    /// Writes flags packed least-significant-bit first.
    pub fn write_bits_byte(&mut self, bits: &[bool]) {
        self.put(&pack_bits(bits));
    }

    /// Finishes writing and returns the buffer trimmed to its written length.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        let mut buf = self.buf;
        buf.shrink_to_fit();
        buf
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }
}
