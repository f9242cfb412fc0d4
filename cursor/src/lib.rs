//! Little-endian byte cursor primitives for the wld world codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for offset-based
//! encoding and decoding, plus the BitsByte helpers used wherever the world
//! format stores boolean groups.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads and jumps are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about worlds, tiles, or sections.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use cursor::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_i32(194);
//! writer.write_string("Cobalt Hills").unwrap();
//! writer.write_bits_byte(&[true, false, true]);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_i32().unwrap(), 194);
//! assert_eq!(reader.read_string().unwrap(), "Cobalt Hills");
//! assert_eq!(reader.read_bits_byte(3).unwrap(), vec![true, false, true]);
//! ```

mod bits;
mod error;
mod progress;
mod reader;
mod writer;

pub use bits::{pack_bits, packed_len, unpack_bits};
pub use error::{CursorError, CursorResult};
pub use progress::Progress;
pub use reader::ByteReader;
pub use writer::ByteWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = ByteWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = ByteReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_bool(true);
        writer.write_u8(0xAB);
        writer.write_i16(-300);
        writer.write_u32(7);
        writer.write_f32(0.5);
        writer.write_f64(-12.75);
        writer.write_bytes(b"relogic");
        writer.write_string("").unwrap();
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_i16().unwrap(), -300);
        assert_eq!(reader.read_u32().unwrap(), 7);
        assert!((reader.read_f32().unwrap() - 0.5).abs() < f32::EPSILON);
        assert!((reader.read_f64().unwrap() + 12.75).abs() < f64::EPSILON);
        assert_eq!(reader.read_array::<7>().unwrap(), *b"relogic");
        assert_eq!(reader.read_string().unwrap(), "");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reserved_region_backpatch() {
        let mut writer = ByteWriter::new();
        let slot = writer.position();
        writer.skip(4);
        writer.write_string("payload").unwrap();
        let end = writer.position();
        writer.jump(slot).unwrap();
        writer.write_u32(u32::try_from(end).unwrap());
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        let recorded = reader.read_u32().unwrap() as usize;
        assert_eq!(reader.read_string().unwrap(), "payload");
        assert_eq!(reader.position(), recorded);
    }
}
