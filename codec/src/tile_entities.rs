//! Interactive furniture with per-instance state.

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i32, SectionContext};
use crate::error::{CodecError, CodecResult};
use crate::types::Position;

/// Item and dye slots on a display doll.
pub const DOLL_SLOTS: usize = 8;

/// Item and dye slots on a hat rack.
pub const HAT_RACK_SLOTS: usize = 2;

/// An item held by a tile entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlotItem {
    pub id: i16,
    pub prefix: u8,
    pub stack: i16,
}

impl SlotItem {
    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            id: reader.read_i16()?,
            prefix: reader.read_u8()?,
            stack: reader.read_i16()?,
        })
    }

    fn write(self, writer: &mut ByteWriter) {
        writer.write_i16(self.id);
        writer.write_u8(self.prefix);
        writer.write_i16(self.stack);
    }
}

/// The state carried by each kind of tile entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TileEntityPayload {
    TargetDummy {
        npc: i16,
    },
    ItemFrame(SlotItem),
    LogicSensor {
        check: u8,
        on: bool,
    },
    DisplayDoll {
        items: [Option<SlotItem>; DOLL_SLOTS],
        dyes: [Option<SlotItem>; DOLL_SLOTS],
    },
    WeaponsRack(SlotItem),
    HatRack {
        items: [Option<SlotItem>; HAT_RACK_SLOTS],
        dyes: [Option<SlotItem>; HAT_RACK_SLOTS],
    },
    FoodPlatter(SlotItem),
    TeleportationPylon,
}

impl TileEntityPayload {
    /// Returns the stored type tag.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::TargetDummy { .. } => 0,
            Self::ItemFrame(_) => 1,
            Self::LogicSensor { .. } => 2,
            Self::DisplayDoll { .. } => 3,
            Self::WeaponsRack(_) => 4,
            Self::HatRack { .. } => 5,
            Self::FoodPlatter(_) => 6,
            Self::TeleportationPylon => 7,
        }
    }
}

/// A positioned tile entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TileEntity {
    pub id: i32,
    pub position: Position<i16>,
    pub payload: TileEntityPayload,
}

pub fn decode_tile_entities(
    reader: &mut ByteReader<'_>,
    ctx: &SectionContext<'_>,
) -> CodecResult<Vec<TileEntity>> {
    let count = ctx.read_count_i32(reader, "tile entity")?;
    (0..count).map(|_| read_tile_entity(reader)).collect()
}

fn read_tile_entity(reader: &mut ByteReader<'_>) -> CodecResult<TileEntity> {
    let tag = reader.read_u8()?;
    let id = reader.read_i32()?;
    let position = Position::new(reader.read_i16()?, reader.read_i16()?);
    let payload = match tag {
        0 => TileEntityPayload::TargetDummy {
            npc: reader.read_i16()?,
        },
        1 => TileEntityPayload::ItemFrame(SlotItem::read(reader)?),
        2 => TileEntityPayload::LogicSensor {
            check: reader.read_u8()?,
            on: reader.read_bool()?,
        },
        3 => {
            let item_map = reader.read_bits_byte(DOLL_SLOTS)?;
            let dye_map = reader.read_bits_byte(DOLL_SLOTS)?;
            TileEntityPayload::DisplayDoll {
                items: read_slots(reader, &item_map)?,
                dyes: read_slots(reader, &dye_map)?,
            }
        }
        4 => TileEntityPayload::WeaponsRack(SlotItem::read(reader)?),
        5 => {
            // One byte: bits 0-1 items, bits 2-3 dyes.
            let map = reader.read_bits_byte(HAT_RACK_SLOTS * 2)?;
            let (item_map, dye_map) = map.split_at(HAT_RACK_SLOTS);
            TileEntityPayload::HatRack {
                items: read_slots(reader, item_map)?,
                dyes: read_slots(reader, dye_map)?,
            }
        }
        6 => TileEntityPayload::FoodPlatter(SlotItem::read(reader)?),
        7 => TileEntityPayload::TeleportationPylon,
        tag => return Err(CodecError::UnknownTileEntityKind { tag }),
    };
    Ok(TileEntity {
        id,
        position,
        payload,
    })
}

fn read_slots<const N: usize>(
    reader: &mut ByteReader<'_>,
    map: &[bool],
) -> CodecResult<[Option<SlotItem>; N]> {
    let mut slots = [None; N];
    for (slot, present) in slots.iter_mut().zip(map) {
        if *present {
            *slot = Some(SlotItem::read(reader)?);
        }
    }
    Ok(slots)
}

pub fn encode_tile_entities(entities: &[TileEntity], writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i32(writer, "tile entity", entities.len())?;
    for entity in entities {
        writer.write_u8(entity.payload.tag());
        writer.write_i32(entity.id);
        writer.write_i16(entity.position.x);
        writer.write_i16(entity.position.y);
        match &entity.payload {
            TileEntityPayload::TargetDummy { npc } => writer.write_i16(*npc),
            TileEntityPayload::ItemFrame(item)
            | TileEntityPayload::WeaponsRack(item)
            | TileEntityPayload::FoodPlatter(item) => item.write(writer),
            TileEntityPayload::LogicSensor { check, on } => {
                writer.write_u8(*check);
                writer.write_bool(*on);
            }
            TileEntityPayload::DisplayDoll { items, dyes } => {
                writer.write_bits_byte(&presence(items));
                writer.write_bits_byte(&presence(dyes));
                write_slots(writer, items);
                write_slots(writer, dyes);
            }
            TileEntityPayload::HatRack { items, dyes } => {
                let mut map = presence(items);
                map.extend(presence(dyes));
                writer.write_bits_byte(&map);
                write_slots(writer, items);
                write_slots(writer, dyes);
            }
            TileEntityPayload::TeleportationPylon => {}
        }
    }
    Ok(())
}

fn presence(slots: &[Option<SlotItem>]) -> Vec<bool> {
    slots.iter().map(Option::is_some).collect()
}

fn write_slots(writer: &mut ByteWriter, slots: &[Option<SlotItem>]) {
    for item in slots.iter().flatten() {
        item.write(writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CodecLimits;

    const SWORD: SlotItem = SlotItem {
        id: 757,
        prefix: 81,
        stack: 1,
    };

    fn entity(id: i32, payload: TileEntityPayload) -> TileEntity {
        TileEntity {
            id,
            position: Position::new(100, 200),
            payload,
        }
    }

    fn round_trip(entities: &[TileEntity]) -> Vec<TileEntity> {
        let mut writer = ByteWriter::new();
        encode_tile_entities(entities, &mut writer).unwrap();
        let bytes = writer.finish();
        let limits = CodecLimits::default();
        let ctx = SectionContext::new(279, &[], 1, 1, &limits).unwrap();
        let mut reader = ByteReader::new(&bytes);
        let decoded = decode_tile_entities(&mut reader, &ctx).unwrap();
        assert_eq!(reader.remaining(), 0);
        decoded
    }

    #[test]
    fn every_kind_round_trips() {
        let mut doll_items = [None; DOLL_SLOTS];
        doll_items[0] = Some(SWORD);
        doll_items[7] = Some(SlotItem {
            id: 1,
            prefix: 0,
            stack: 3,
        });
        let mut doll_dyes = [None; DOLL_SLOTS];
        doll_dyes[2] = Some(SlotItem {
            id: 1007,
            prefix: 0,
            stack: 1,
        });

        let entities = vec![
            entity(0, TileEntityPayload::TargetDummy { npc: -1 }),
            entity(1, TileEntityPayload::ItemFrame(SWORD)),
            entity(2, TileEntityPayload::LogicSensor { check: 4, on: true }),
            entity(
                3,
                TileEntityPayload::DisplayDoll {
                    items: doll_items,
                    dyes: doll_dyes,
                },
            ),
            entity(4, TileEntityPayload::WeaponsRack(SlotItem::default())),
            entity(
                5,
                TileEntityPayload::HatRack {
                    items: [None, Some(SWORD)],
                    dyes: [Some(SWORD), None],
                },
            ),
            entity(6, TileEntityPayload::FoodPlatter(SWORD)),
            entity(7, TileEntityPayload::TeleportationPylon),
        ];
        assert_eq!(round_trip(&entities), entities);
    }

    #[test]
    fn tags_follow_payload_order() {
        assert_eq!(TileEntityPayload::TargetDummy { npc: 0 }.tag(), 0);
        assert_eq!(TileEntityPayload::TeleportationPylon.tag(), 7);
    }

    #[test]
    fn hat_rack_packs_one_map_byte() {
        let rack = entity(
            9,
            TileEntityPayload::HatRack {
                items: [Some(SWORD), None],
                dyes: [None, Some(SWORD)],
            },
        );
        let mut writer = ByteWriter::new();
        encode_tile_entities(&[rack], &mut writer).unwrap();
        let bytes = writer.finish();
        // count, tag, id, x, y, then the slot map
        assert_eq!(bytes[4 + 1 + 4 + 4], 0b1001);
        assert_eq!(bytes.len(), 4 + 1 + 4 + 4 + 1 + 2 * 5);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_i32(1);
        writer.write_u8(8);
        writer.write_i32(0);
        writer.write_i16(0);
        writer.write_i16(0);
        let bytes = writer.finish();
        let limits = CodecLimits::default();
        let ctx = SectionContext::new(279, &[], 1, 1, &limits).unwrap();
        assert_eq!(
            decode_tile_entities(&mut ByteReader::new(&bytes), &ctx),
            Err(CodecError::UnknownTileEntityKind { tag: 8 })
        );
    }
}
