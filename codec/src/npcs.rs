//! Town NPCs and lunar pillars.
//!
//! Both lists are sentinel-terminated: every record is preceded by `true`
//! and each list is closed by `false`. Town NPCs come first.

use cursor::{ByteReader, ByteWriter};
use format::versions;

use crate::context::SectionContext;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::types::Position;

/// Display names written in place of numeric ids before version 190.
pub static LEGACY_NPC_NAMES: &[(&str, i32)] = &[
    ("Merchant", 17),
    ("Nurse", 18),
    ("Arms Dealer", 19),
    ("Dryad", 20),
    ("Guide", 22),
    ("Old Man", 37),
    ("Demolitionist", 38),
    ("Clothier", 54),
    ("Bound Goblin", 105),
    ("Bound Wizard", 106),
    ("Goblin Tinkerer", 107),
    ("Wizard", 108),
    ("Bound Mechanic", 123),
    ("Mechanic", 124),
    ("Santa Claus", 142),
    ("Truffle", 160),
    ("Steampunker", 178),
    ("Dye Trader", 207),
    ("Party Girl", 208),
    ("Cyborg", 209),
    ("Painter", 227),
    ("Witch Doctor", 228),
    ("Pirate", 229),
    ("Stylist", 353),
    ("Webbed Stylist", 354),
    ("Worm", 357),
    ("Traveling Merchant", 368),
    ("Angler", 369),
    ("Sleeping Angler", 376),
    ("Grasshopper", 377),
    ("Tax Collector", 441),
    ("Gold Grasshopper", 446),
    ("Gold Worm", 448),
    ("Skeleton Merchant", 453),
    ("Enchanted Nightcrawler", 484),
    ("Grubby", 485),
    ("Sluggy", 486),
    ("Buggy", 487),
    ("Eternia Crystal", 548),
    ("Tavernkeep", 550),
    ("Unconscious Man", 579),
    ("Golfer", 588),
    ("Maggot", 606),
    ("Zoologist", 633),
    ("Cat", 637),
    ("Dog", 638),
    ("Bunny", 656),
    ("Princess", 663),
];

/// Looks up the id of a legacy display name.
#[must_use]
pub fn legacy_npc_id(name: &str) -> Option<i32> {
    LEGACY_NPC_NAMES
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, id)| *id)
}

/// Looks up the legacy display name of an id.
#[must_use]
pub fn legacy_npc_name(id: i32) -> Option<&'static str> {
    LEGACY_NPC_NAMES
        .iter()
        .find(|(_, entry)| *entry == id)
        .map(|(name, _)| *name)
}

/// A resident NPC.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TownNpc {
    pub id: i32,
    pub name: String,
    pub position: Position<f32>,
    pub homeless: bool,
    pub home: Position<i32>,
    /// Sprite variation, stored from version 213.
    pub variation: Option<i32>,
}

/// A celestial pillar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PillarNpc {
    pub id: i32,
    pub position: Position<f32>,
}

/// An NPC record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Npc {
    Town(TownNpc),
    Pillar(PillarNpc),
}

pub fn decode_npcs(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<Vec<Npc>> {
    let mut npcs = Vec::new();
    while reader.read_bool()? {
        check_record_limit(npcs.len(), ctx)?;
        npcs.push(Npc::Town(read_town_npc(reader, ctx.version)?));
    }
    while reader.read_bool()? {
        check_record_limit(npcs.len(), ctx)?;
        let id = reader.read_i32()?;
        let position = Position::new(reader.read_f32()?, reader.read_f32()?);
        npcs.push(Npc::Pillar(PillarNpc { id, position }));
    }
    Ok(npcs)
}

fn check_record_limit(len: usize, ctx: &SectionContext<'_>) -> CodecResult<()> {
    if len >= ctx.limits.max_records {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Records,
            limit: ctx.limits.max_records,
            actual: len + 1,
        });
    }
    Ok(())
}

fn read_town_npc(reader: &mut ByteReader<'_>, version: i32) -> CodecResult<TownNpc> {
    let id = if version >= versions::NPC_NUMERIC_IDS {
        reader.read_i32()?
    } else {
        let name = reader.read_string()?;
        legacy_npc_id(&name).ok_or(CodecError::UnknownNpcName { name })?
    };
    let name = reader.read_string()?;
    let position = Position::new(reader.read_f32()?, reader.read_f32()?);
    let homeless = reader.read_bool()?;
    let home = Position::new(reader.read_i32()?, reader.read_i32()?);
    let variation = if version >= versions::NPC_VARIATIONS && reader.read_bits_byte(1)?[0] {
        Some(reader.read_i32()?)
    } else {
        None
    };
    Ok(TownNpc {
        id,
        name,
        position,
        homeless,
        home,
        variation,
    })
}

/// Encodes town NPCs, then pillars, each list closed by `false`.
pub fn encode_npcs(npcs: &[Npc], writer: &mut ByteWriter, version: i32) -> CodecResult<()> {
    for npc in npcs {
        if let Npc::Town(town) = npc {
            writer.write_bool(true);
            write_town_npc(writer, town, version)?;
        }
    }
    writer.write_bool(false);

    for npc in npcs {
        if let Npc::Pillar(pillar) = npc {
            writer.write_bool(true);
            writer.write_i32(pillar.id);
            writer.write_f32(pillar.position.x);
            writer.write_f32(pillar.position.y);
        }
    }
    writer.write_bool(false);
    Ok(())
}

fn write_town_npc(writer: &mut ByteWriter, npc: &TownNpc, version: i32) -> CodecResult<()> {
    if version >= versions::NPC_NUMERIC_IDS {
        writer.write_i32(npc.id);
    } else {
        let name = legacy_npc_name(npc.id).ok_or(CodecError::UnmappedNpcId { id: npc.id })?;
        writer.write_string(name)?;
    }
    writer.write_string(&npc.name)?;
    writer.write_f32(npc.position.x);
    writer.write_f32(npc.position.y);
    writer.write_bool(npc.homeless);
    writer.write_i32(npc.home.x);
    writer.write_i32(npc.home.y);
    if version >= versions::NPC_VARIATIONS {
        writer.write_bits_byte(&[npc.variation.is_some()]);
        if let Some(variation) = npc.variation {
            writer.write_i32(variation);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CodecLimits;

    fn guide() -> TownNpc {
        TownNpc {
            id: 22,
            name: "Andrew".to_owned(),
            position: Position::new(33_600.0, 6_400.0),
            homeless: true,
            home: Position::new(2100, 400),
            variation: Some(1),
        }
    }

    fn decode(bytes: &[u8], version: i32) -> CodecResult<Vec<Npc>> {
        let limits = CodecLimits::for_testing();
        let ctx = SectionContext::new(version, &[], 1, 1, &limits)?;
        let mut reader = ByteReader::new(bytes);
        let npcs = decode_npcs(&mut reader, &ctx)?;
        assert_eq!(reader.remaining(), 0);
        Ok(npcs)
    }

    fn encode(npcs: &[Npc], version: i32) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        encode_npcs(npcs, &mut writer, version).unwrap();
        writer.finish()
    }

    #[test]
    fn town_then_pillars_round_trip() {
        let npcs = vec![
            Npc::Town(guide()),
            Npc::Town(TownNpc {
                variation: None,
                ..TownNpc::default()
            }),
            Npc::Pillar(PillarNpc {
                id: 517,
                position: Position::new(100.5, 200.25),
            }),
        ];
        let bytes = encode(&npcs, 279);
        assert_eq!(decode(&bytes, 279).unwrap(), npcs);
    }

    #[test]
    fn empty_section_is_two_terminators() {
        assert_eq!(encode(&[], 279), vec![0, 0]);
        assert!(decode(&[0, 0], 279).unwrap().is_empty());
    }

    #[test]
    fn variation_absent_before_213() {
        let bytes = encode(&[Npc::Town(guide())], 212);
        let decoded = decode(&bytes, 212).unwrap();
        let Npc::Town(town) = &decoded[0] else {
            panic!("expected a town NPC");
        };
        assert_eq!(town.variation, None);
        assert_eq!(town.id, 22);
    }

    #[test]
    fn legacy_versions_store_names() {
        let bytes = encode(&[Npc::Town(guide())], 189);
        // sentinel, then the length-prefixed legacy name
        assert_eq!(&bytes[1..7], b"\x05Guide");
        let decoded = decode(&bytes, 189).unwrap();
        assert!(matches!(&decoded[0], Npc::Town(town) if town.id == 22));
    }

    #[test]
    fn unknown_legacy_name_is_an_error() {
        let mut writer = ByteWriter::new();
        writer.write_bool(true);
        writer.write_string("Mystery Man").unwrap();
        let bytes = writer.finish();
        assert_eq!(
            decode(&bytes, 189),
            Err(CodecError::UnknownNpcName {
                name: "Mystery Man".to_owned()
            })
        );
    }

    #[test]
    fn unmapped_id_cannot_be_written_as_legacy() {
        let npc = TownNpc {
            id: 9999,
            ..guide()
        };
        let mut writer = ByteWriter::new();
        assert_eq!(
            encode_npcs(&[Npc::Town(npc)], &mut writer, 189),
            Err(CodecError::UnmappedNpcId { id: 9999 })
        );
    }

    #[test]
    fn legacy_table_is_bijective() {
        for (name, id) in LEGACY_NPC_NAMES {
            assert_eq!(legacy_npc_id(name), Some(*id));
            assert_eq!(legacy_npc_name(*id), Some(*name));
        }
        assert_eq!(LEGACY_NPC_NAMES.len(), 48);
    }
}
