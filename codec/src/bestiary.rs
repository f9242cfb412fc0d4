//! Bestiary progress: kill counts, sightings and chats.

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i32, SectionContext};
use crate::error::CodecResult;

/// Kills recorded for one creature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KillCount {
    pub npc: String,
    pub count: i32,
}

/// The bestiary section. Present from version 225.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bestiary {
    pub kills: Vec<KillCount>,
    pub sightings: Vec<String>,
    pub chats: Vec<String>,
}

impl Bestiary {
    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kills.is_empty() && self.sightings.is_empty() && self.chats.is_empty()
    }
}

pub fn decode_bestiary(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<Bestiary> {
    let kills = ctx.read_list_len(reader, "bestiary kill")?;
    let kills = (0..kills)
        .map(|_| {
            Ok(KillCount {
                npc: reader.read_string()?,
                count: reader.read_i32()?,
            })
        })
        .collect::<CodecResult<_>>()?;
    let sightings = read_names(reader, ctx, "bestiary sighting")?;
    let chats = read_names(reader, ctx, "bestiary chat")?;
    Ok(Bestiary {
        kills,
        sightings,
        chats,
    })
}

fn read_names(
    reader: &mut ByteReader<'_>,
    ctx: &SectionContext<'_>,
    what: &'static str,
) -> CodecResult<Vec<String>> {
    let len = ctx.read_list_len(reader, what)?;
    (0..len)
        .map(|_| reader.read_string().map_err(Into::into))
        .collect()
}

pub fn encode_bestiary(bestiary: &Bestiary, writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i32(writer, "bestiary kill", bestiary.kills.len())?;
    for kill in &bestiary.kills {
        writer.write_string(&kill.npc)?;
        writer.write_i32(kill.count);
    }
    write_names(writer, "bestiary sighting", &bestiary.sightings)?;
    write_names(writer, "bestiary chat", &bestiary.chats)
}

fn write_names(writer: &mut ByteWriter, what: &'static str, names: &[String]) -> CodecResult<()> {
    write_count_i32(writer, what, names.len())?;
    for name in names {
        writer.write_string(name)?;
    }
    Ok(())
}
