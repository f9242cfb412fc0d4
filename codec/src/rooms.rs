//! Town rooms: which NPC lives where.

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i32, SectionContext};
use crate::error::CodecResult;
use crate::types::Position;

/// A room assigned to a town NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Room {
    pub npc_id: i32,
    pub position: Position<i32>,
}

pub fn decode_rooms(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<Vec<Room>> {
    let count = ctx.read_count_i32(reader, "room")?;
    (0..count)
        .map(|_| {
            let npc_id = reader.read_i32()?;
            let position = Position::new(reader.read_i32()?, reader.read_i32()?);
            Ok(Room { npc_id, position })
        })
        .collect()
}

pub fn encode_rooms(rooms: &[Room], writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i32(writer, "room", rooms.len())?;
    for room in rooms {
        writer.write_i32(room.npc_id);
        writer.write_i32(room.position.x);
        writer.write_i32(room.position.y);
    }
    Ok(())
}
