//! Weighted pressure plates.

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i32, SectionContext};
use crate::error::CodecResult;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PressurePlate {
    pub position: Position<i32>,
}

pub fn decode_pressure_plates(
    reader: &mut ByteReader<'_>,
    ctx: &SectionContext<'_>,
) -> CodecResult<Vec<PressurePlate>> {
    let count = ctx.read_count_i32(reader, "pressure plate")?;
    (0..count)
        .map(|_| {
            Ok(PressurePlate {
                position: Position::new(reader.read_i32()?, reader.read_i32()?),
            })
        })
        .collect()
}

pub fn encode_pressure_plates(plates: &[PressurePlate], writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i32(writer, "pressure plate", plates.len())?;
    for plate in plates {
        writer.write_i32(plate.position.x);
        writer.write_i32(plate.position.y);
    }
    Ok(())
}
