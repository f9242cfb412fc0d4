//! Chests and their 40-slot inventories.

use std::collections::BTreeMap;

use cursor::{ByteReader, ByteWriter};

use crate::context::{write_count_i16, SectionContext};
use crate::error::{CodecError, CodecResult};
use crate::types::Position;

/// Slots per chest.
pub const CHEST_SLOTS: u16 = 40;

/// An item stack in a chest slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChestItem {
    pub id: i32,
    pub prefix: u8,
    pub stack: i16,
}

/// A chest. Empty slots are absent from `items`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chest {
    pub position: Position<i32>,
    pub name: Option<String>,
    pub items: BTreeMap<u16, ChestItem>,
}

/// Decodes the chest section.
///
/// The stored slot count is honoured so files written with larger chests
/// still decode; slots past [`CHEST_SLOTS`] cannot be written back.
pub fn decode_chests(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<Vec<Chest>> {
    let count = ctx.read_count_i16(reader, "chest")?;
    let slots = ctx.read_count_i16(reader, "chest slot")?;

    let mut chests = Vec::with_capacity(count);
    for _ in 0..count {
        let position = Position::new(reader.read_i32()?, reader.read_i32()?);
        let name = Some(reader.read_string()?).filter(|name| !name.is_empty());
        let mut items = BTreeMap::new();
        for slot in 0..slots {
            let stack = reader.read_i16()?;
            if stack == 0 {
                continue;
            }
            let id = reader.read_i32()?;
            let prefix = reader.read_u8()?;
            // Slot counts fit in i16, so every index fits in u16.
            let slot = u16::try_from(slot).unwrap_or(u16::MAX);
            items.insert(slot, ChestItem { id, prefix, stack });
        }
        chests.push(Chest {
            position,
            name,
            items,
        });
    }
    Ok(chests)
}

/// Encodes the chest section with [`CHEST_SLOTS`] slots per chest.
pub fn encode_chests(chests: &[Chest], writer: &mut ByteWriter) -> CodecResult<()> {
    write_count_i16(writer, "chest", chests.len())?;
    write_count_i16(writer, "chest slot", usize::from(CHEST_SLOTS))?;

    for chest in chests {
        if let Some((&slot, _)) = chest.items.range(CHEST_SLOTS..).next() {
            return Err(CodecError::ChestSlotOutOfRange {
                slot,
                slots: CHEST_SLOTS,
            });
        }
        writer.write_i32(chest.position.x);
        writer.write_i32(chest.position.y);
        writer.write_string(chest.name.as_deref().unwrap_or_default())?;
        for slot in 0..CHEST_SLOTS {
            match chest.items.get(&slot) {
                Some(item) if item.stack != 0 => {
                    writer.write_i16(item.stack);
                    writer.write_i32(item.id);
                    writer.write_u8(item.prefix);
                }
                _ => writer.write_i16(0),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CodecLimits;

    fn decode(bytes: &[u8]) -> CodecResult<Vec<Chest>> {
        let limits = CodecLimits::for_testing();
        let ctx = SectionContext::new(279, &[], 1, 1, &limits)?;
        decode_chests(&mut ByteReader::new(bytes), &ctx)
    }

    fn sample() -> Chest {
        let mut items = BTreeMap::new();
        items.insert(
            0,
            ChestItem {
                id: 3507,
                prefix: 81,
                stack: 1,
            },
        );
        items.insert(
            39,
            ChestItem {
                id: 73,
                prefix: 0,
                stack: 99,
            },
        );
        Chest {
            position: Position::new(1200, 340),
            name: Some("Loot".to_owned()),
            items,
        }
    }

    #[test]
    fn chests_round_trip() {
        let chests = vec![sample(), Chest::default()];
        let mut writer = ByteWriter::new();
        encode_chests(&chests, &mut writer).unwrap();
        let bytes = writer.finish();
        assert_eq!(decode(&bytes).unwrap(), chests);
    }

    #[test]
    fn empty_slots_cost_two_bytes() {
        let mut writer = ByteWriter::new();
        encode_chests(&[Chest::default()], &mut writer).unwrap();
        // counts, position, empty name, 40 empty slots
        assert_eq!(writer.len(), 2 + 2 + 8 + 1 + usize::from(CHEST_SLOTS) * 2);
    }

    #[test]
    fn slot_past_capacity_fails_to_encode() {
        let mut chest = Chest::default();
        chest.items.insert(
            40,
            ChestItem {
                id: 1,
                prefix: 0,
                stack: 1,
            },
        );
        let mut writer = ByteWriter::new();
        assert_eq!(
            encode_chests(&[chest], &mut writer),
            Err(CodecError::ChestSlotOutOfRange {
                slot: 40,
                slots: CHEST_SLOTS
            })
        );
    }

    #[test]
    fn stored_slot_count_is_honoured() {
        let mut writer = ByteWriter::new();
        writer.write_i16(1);
        writer.write_i16(2);
        writer.write_i32(5);
        writer.write_i32(6);
        writer.write_string("").unwrap();
        writer.write_i16(0);
        writer.write_i16(7);
        writer.write_i32(28);
        writer.write_u8(0);
        let bytes = writer.finish();

        let chests = decode(&bytes).unwrap();
        assert_eq!(chests.len(), 1);
        assert_eq!(chests[0].name, None);
        assert_eq!(
            chests[0].items.get(&1),
            Some(&ChestItem {
                id: 28,
                prefix: 0,
                stack: 7
            })
        );
    }

    #[test]
    fn negative_count_rejected() {
        assert_eq!(
            decode(&(-1i16).to_le_bytes()),
            Err(CodecError::InvalidCount {
                what: "chest",
                count: -1
            })
        );
    }
}
