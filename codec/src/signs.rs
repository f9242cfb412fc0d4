//! Signs.

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i16, SectionContext};
use crate::error::CodecResult;
use crate::types::Position;

/// A sign and its text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sign {
    pub text: String,
    pub position: Position<i32>,
}

pub fn decode_signs(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<Vec<Sign>> {
    let count = ctx.read_count_i16(reader, "sign")?;
    (0..count)
        .map(|_| {
            let text = reader.read_string()?;
            let position = Position::new(reader.read_i32()?, reader.read_i32()?);
            Ok(Sign { text, position })
        })
        .collect()
}

pub fn encode_signs(signs: &[Sign], writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i16(writer, "sign", signs.len())?;
    for sign in signs {
        writer.write_string(&sign.text)?;
        writer.write_i32(sign.position.x);
        writer.write_i32(sign.position.y);
    }
    Ok(())
}
