//! The cascading flag bytes that open every stored tile.
//!
//! Up to four bytes precede a tile. Bit 0 of each byte says whether the
//! next one follows, so a byte is only written when it, or a later one,
//! carries information.

use cursor::{ByteReader, ByteWriter};
use format::versions;

use crate::tile::{LiquidKind, Tile};

const F1_MORE: u8 = 1;
const F1_BLOCK: u8 = 1 << 1;
const F1_WALL: u8 = 1 << 2;
const F1_LIQUID_SHIFT: u8 = 3;
const F1_WIDE_BLOCK: u8 = 1 << 5;
const F1_RUN_SHIFT: u8 = 6;

const F2_MORE: u8 = 1;
const F2_RED: u8 = 1 << 1;
const F2_BLUE: u8 = 1 << 2;
const F2_GREEN: u8 = 1 << 3;
const F2_SLOPE_SHIFT: u8 = 4;

const F3_MORE: u8 = 1;
const F3_ACTUATOR: u8 = 1 << 1;
const F3_ACTUATED: u8 = 1 << 2;
const F3_BLOCK_PAINT: u8 = 1 << 3;
const F3_WALL_PAINT: u8 = 1 << 4;
const F3_YELLOW: u8 = 1 << 5;
const F3_WIDE_WALL: u8 = 1 << 6;
const F3_SHIMMER: u8 = 1 << 7;

const F4_INVISIBLE_BLOCK: u8 = 1 << 1;
const F4_INVISIBLE_WALL: u8 = 1 << 2;
const F4_FULLBRIGHT_BLOCK: u8 = 1 << 3;
const F4_FULLBRIGHT_WALL: u8 = 1 << 4;

/// Width of the repeat count that follows a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunWidth {
    #[default]
    None,
    Byte,
    Short,
}

impl RunWidth {
    /// Decodes the two run bits. Code 3 is unused and means no run.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Byte,
            2 => Self::Short,
            _ => Self::None,
        }
    }

    /// Returns the two run bits.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Byte => 1,
            Self::Short => 2,
        }
    }

    /// Picks the narrowest width holding `run`.
    #[must_use]
    pub const fn for_run(run: usize) -> Self {
        match run {
            0 => Self::None,
            1..=255 => Self::Byte,
            _ => Self::Short,
        }
    }
}

/// Every flag bit of a tile, decoded into named fields.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileFlags {
    pub block: bool,
    pub wall: bool,
    pub liquid: u8,
    pub wide_block: bool,
    pub run: RunWidth,
    pub red: bool,
    pub blue: bool,
    pub green: bool,
    pub slope: u8,
    pub actuator: bool,
    pub actuated: bool,
    pub block_paint: bool,
    pub wall_paint: bool,
    pub yellow: bool,
    pub wide_wall: bool,
    pub shimmer: bool,
    pub invisible_block: bool,
    pub invisible_wall: bool,
    pub fullbright_block: bool,
    pub fullbright_wall: bool,
}

impl TileFlags {
    /// Reads the flag cascade.
    ///
    /// The fourth byte only exists from version 269; before that bit 0 of
    /// the third byte is ignored.
    pub fn read(reader: &mut ByteReader<'_>, version: i32) -> cursor::CursorResult<Self> {
        let f1 = reader.read_u8()?;
        let f2 = if f1 & F1_MORE != 0 { reader.read_u8()? } else { 0 };
        let f3 = if f2 & F2_MORE != 0 { reader.read_u8()? } else { 0 };
        let f4 = if version >= versions::TILE_FLAGS4 && f3 & F3_MORE != 0 {
            reader.read_u8()?
        } else {
            0
        };
        Ok(Self::from_bytes([f1, f2, f3, f4], version))
    }

    /// Decodes four flag bytes, dropping bits the version does not define.
    #[must_use]
    pub const fn from_bytes([f1, f2, f3, f4]: [u8; 4], version: i32) -> Self {
        let new_bits = version >= versions::TILE_FLAGS4;
        Self {
            block: f1 & F1_BLOCK != 0,
            wall: f1 & F1_WALL != 0,
            liquid: (f1 >> F1_LIQUID_SHIFT) & 0b11,
            wide_block: f1 & F1_WIDE_BLOCK != 0,
            run: RunWidth::from_code(f1 >> F1_RUN_SHIFT),
            red: f2 & F2_RED != 0,
            blue: f2 & F2_BLUE != 0,
            green: f2 & F2_GREEN != 0,
            slope: (f2 >> F2_SLOPE_SHIFT) & 0b111,
            actuator: f3 & F3_ACTUATOR != 0,
            actuated: f3 & F3_ACTUATED != 0,
            block_paint: f3 & F3_BLOCK_PAINT != 0,
            wall_paint: f3 & F3_WALL_PAINT != 0,
            yellow: f3 & F3_YELLOW != 0,
            wide_wall: version >= versions::WALL_HIGH_BYTE && f3 & F3_WIDE_WALL != 0,
            shimmer: new_bits && f3 & F3_SHIMMER != 0,
            invisible_block: f4 & F4_INVISIBLE_BLOCK != 0,
            invisible_wall: f4 & F4_INVISIBLE_WALL != 0,
            fullbright_block: f4 & F4_FULLBRIGHT_BLOCK != 0,
            fullbright_wall: f4 & F4_FULLBRIGHT_WALL != 0,
        }
    }

    /// Computes the flags needed to store `tile` followed by `run` copies.
    #[must_use]
    pub fn for_tile(tile: &Tile, run: usize) -> Self {
        let block = tile.block.as_ref();
        let wall = tile.wall.as_ref();
        Self {
            block: block.is_some(),
            wall: wall.is_some(),
            liquid: tile.liquid.map_or(0, |liquid| liquid.kind.code()),
            wide_block: block.is_some_and(|b| b.id > 0xFF),
            run: RunWidth::for_run(run),
            red: tile.wiring.red,
            blue: tile.wiring.blue,
            green: tile.wiring.green,
            slope: tile.slope.map_or(0, |slope| slope.code()),
            actuator: tile.actuator,
            actuated: tile.actuated,
            block_paint: block.is_some_and(|b| b.paint.is_some()),
            wall_paint: wall.is_some_and(|w| w.paint.is_some()),
            yellow: tile.wiring.yellow,
            wide_wall: wall.is_some_and(|w| w.id > 0xFF),
            shimmer: matches!(tile.liquid, Some(liquid) if liquid.kind == LiquidKind::Shimmer),
            invisible_block: tile.coatings.invisible_block,
            invisible_wall: tile.coatings.invisible_wall,
            fullbright_block: tile.coatings.fullbright_block,
            fullbright_wall: tile.coatings.fullbright_wall,
        }
    }

    /// Packs the flags into four bytes, setting the continuation bits.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 4] {
        let f4 = bit(self.invisible_block, F4_INVISIBLE_BLOCK)
            | bit(self.invisible_wall, F4_INVISIBLE_WALL)
            | bit(self.fullbright_block, F4_FULLBRIGHT_BLOCK)
            | bit(self.fullbright_wall, F4_FULLBRIGHT_WALL);
        let mut f3 = bit(self.actuator, F3_ACTUATOR)
            | bit(self.actuated, F3_ACTUATED)
            | bit(self.block_paint, F3_BLOCK_PAINT)
            | bit(self.wall_paint, F3_WALL_PAINT)
            | bit(self.yellow, F3_YELLOW)
            | bit(self.wide_wall, F3_WIDE_WALL)
            | bit(self.shimmer, F3_SHIMMER);
        if f4 != 0 {
            f3 |= F3_MORE;
        }
        let mut f2 = bit(self.red, F2_RED)
            | bit(self.blue, F2_BLUE)
            | bit(self.green, F2_GREEN)
            | ((self.slope & 0b111) << F2_SLOPE_SHIFT);
        if f3 != 0 {
            f2 |= F2_MORE;
        }
        let mut f1 = bit(self.block, F1_BLOCK)
            | bit(self.wall, F1_WALL)
            | ((self.liquid & 0b11) << F1_LIQUID_SHIFT)
            | bit(self.wide_block, F1_WIDE_BLOCK)
            | (self.run.code() << F1_RUN_SHIFT);
        if f2 != 0 {
            f1 |= F1_MORE;
        }
        [f1, f2, f3, f4]
    }

    /// Returns how many flag bytes must be written.
    #[must_use]
    pub const fn depth(&self) -> usize {
        let [f1, f2, f3, _] = self.to_bytes();
        if f3 & F3_MORE != 0 {
            4
        } else if f2 & F2_MORE != 0 {
            3
        } else if f1 & F1_MORE != 0 {
            2
        } else {
            1
        }
    }

    /// Returns `true` if any bit of the fourth byte is set.
    #[must_use]
    pub const fn has_flags4(&self) -> bool {
        self.invisible_block || self.invisible_wall || self.fullbright_block || self.fullbright_wall
    }

    /// Writes the flag bytes, as deep as needed.
    pub fn write(&self, writer: &mut ByteWriter) {
        let bytes = self.to_bytes();
        writer.write_bytes(&bytes[..self.depth()]);
    }
}

const fn bit(set: bool, mask: u8) -> u8 {
    if set {
        mask
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Block, Coatings, Liquid, Slope, Wall, Wiring};

    #[test]
    fn plain_block_needs_one_byte() {
        let flags = TileFlags::for_tile(&Tile::with_block(1), 0);
        assert_eq!(flags.depth(), 1);
        assert_eq!(flags.to_bytes()[0], F1_BLOCK);
    }

    #[test]
    fn wide_block_and_run_bits() {
        let flags = TileFlags::for_tile(&Tile::with_block(300), 400);
        let [f1, ..] = flags.to_bytes();
        assert_eq!(f1 & F1_WIDE_BLOCK, F1_WIDE_BLOCK);
        assert_eq!(f1 >> F1_RUN_SHIFT, 2);
        assert_eq!(RunWidth::for_run(255), RunWidth::Byte);
        assert_eq!(RunWidth::for_run(256), RunWidth::Short);
    }

    #[test]
    fn wiring_needs_two_bytes() {
        let tile = Tile {
            wiring: Wiring {
                red: true,
                ..Wiring::default()
            },
            ..Tile::default()
        };
        let flags = TileFlags::for_tile(&tile, 0);
        assert_eq!(flags.depth(), 2);
        assert_eq!(flags.to_bytes()[..2], [F1_MORE, F2_RED]);
    }

    #[test]
    fn paint_needs_three_bytes() {
        let tile = Tile {
            block: Some(Block {
                paint: Some(4),
                ..Block::new(2)
            }),
            ..Tile::default()
        };
        let flags = TileFlags::for_tile(&tile, 0);
        assert_eq!(flags.depth(), 3);
        assert_eq!(
            flags.to_bytes()[..3],
            [F1_MORE | F1_BLOCK, F2_MORE, F3_BLOCK_PAINT]
        );
    }

    #[test]
    fn coatings_need_four_bytes() {
        let tile = Tile {
            coatings: Coatings {
                fullbright_wall: true,
                ..Coatings::default()
            },
            ..Tile::default()
        };
        let flags = TileFlags::for_tile(&tile, 0);
        assert!(flags.has_flags4());
        assert_eq!(flags.depth(), 4);
        assert_eq!(
            flags.to_bytes(),
            [F1_MORE, F2_MORE, F3_MORE, F4_FULLBRIGHT_WALL]
        );
    }

    #[test]
    fn shimmer_sets_water_code_and_high_bit() {
        let tile = Tile {
            liquid: Some(Liquid {
                kind: LiquidKind::Shimmer,
                amount: 255,
            }),
            ..Tile::default()
        };
        let [f1, f2, f3, _] = TileFlags::for_tile(&tile, 0).to_bytes();
        assert_eq!((f1 >> F1_LIQUID_SHIFT) & 0b11, 1);
        assert_eq!(f2, F2_MORE);
        assert_eq!(f3, F3_SHIMMER);
    }

    #[test]
    fn bytes_round_trip_at_latest_version() {
        let tile = Tile {
            block: Some(Block {
                id: 500,
                frame: None,
                paint: Some(1),
            }),
            wall: Some(Wall {
                id: 400,
                paint: Some(2),
            }),
            liquid: Some(Liquid {
                kind: LiquidKind::Honey,
                amount: 10,
            }),
            slope: Some(Slope::BottomLeft),
            wiring: Wiring {
                red: true,
                blue: true,
                green: true,
                yellow: true,
            },
            actuator: true,
            actuated: true,
            coatings: Coatings {
                invisible_block: true,
                invisible_wall: true,
                fullbright_block: true,
                fullbright_wall: true,
            },
        };
        let flags = TileFlags::for_tile(&tile, 12);
        assert_eq!(TileFlags::from_bytes(flags.to_bytes(), 279), flags);
    }

    #[test]
    fn old_versions_ignore_new_bits() {
        let flags = TileFlags::from_bytes([F1_MORE, F2_MORE, F3_SHIMMER | F3_WIDE_WALL, 0], 221);
        assert!(!flags.shimmer);
        assert!(!flags.wide_wall);

        let flags = TileFlags::from_bytes([F1_MORE, F2_MORE, F3_SHIMMER | F3_WIDE_WALL, 0], 222);
        assert!(!flags.shimmer);
        assert!(flags.wide_wall);
    }

    #[test]
    fn read_skips_fourth_byte_before_269() {
        let bytes = [F1_MORE, F2_MORE, F3_MORE | F3_ACTUATOR, 0xAA];
        let mut reader = ByteReader::new(&bytes);
        let flags = TileFlags::read(&mut reader, 268).unwrap();
        assert!(flags.actuator);
        assert!(!flags.has_flags4());
        assert_eq!(reader.position(), 3);

        let mut reader = ByteReader::new(&bytes);
        let flags = TileFlags::read(&mut reader, 269).unwrap();
        assert!(flags.invisible_block);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn run_code_three_means_no_run() {
        assert_eq!(RunWidth::from_code(3), RunWidth::None);
        let flags = TileFlags::from_bytes([0b1100_0000, 0, 0, 0], 279);
        assert_eq!(flags.run, RunWidth::None);
    }
}
