//! The tile grid and its column-wise run-length codec.
//!
//! Tiles are stored column by column, top to bottom. Each stored tile may
//! be followed by a repeat count giving how many identical tiles follow it
//! in the same column.

use cursor::{ByteReader, ByteWriter, Progress};
use format::versions;
use log::trace;

use crate::context::SectionContext;
use crate::error::{CodecError, CodecResult};
use crate::tile::{Block, Coatings, Frame, Liquid, LiquidKind, Slope, Tile, Wall, Wiring};
use crate::tile_flags::{RunWidth, TileFlags};

/// Block whose stored frame Y is always read back as 0.
pub const FRAME_Y_RESET_BLOCK: u16 = 144;

/// Longest run a single stored tile may carry.
pub const MAX_RUN: usize = i16::MAX as usize;

/// A `width` by `height` grid of tiles, stored column-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates an all-air grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    /// Builds a grid from column-major tiles.
    pub fn from_columns(width: usize, height: usize, tiles: Vec<Tile>) -> CodecResult<Self> {
        if tiles.len() != width * height {
            return Err(CodecError::GridSizeMismatch {
                expected_width: width,
                expected_height: height,
                width: if height == 0 { 0 } else { tiles.len() / height },
                height,
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the tile at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Returns the tile at `(x, y)` mutably.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    /// Returns column `x`, top to bottom.
    #[must_use]
    pub fn column(&self, x: usize) -> Option<&[Tile]> {
        if x >= self.width {
            return None;
        }
        let start = x * self.height;
        Some(&self.tiles[start..start + self.height])
    }

    /// Iterates over columns from left to right.
    pub fn columns(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.height.max(1)).take(self.width)
    }

    /// Counts the non-air tiles.
    #[must_use]
    pub fn count_non_air(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_air()).count()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x * self.height + y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TileGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let columns: Vec<&[Tile]> = self.columns().collect();
        let mut state = serializer.serialize_struct("TileGrid", 3)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("columns", &columns)?;
        state.end()
    }
}

/// Decodes the tile section into a grid of the context's dimensions.
pub fn decode_tiles(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<TileGrid> {
    let (width, height) = (ctx.width, ctx.height);
    let mut tiles = Vec::with_capacity(width * height);
    for x in 0..width {
        let mut y = 0;
        while y < height {
            let (tile, run) = read_tile(reader, ctx)?;
            if y + run >= height {
                return Err(CodecError::TileRunOverflow { x, y, run });
            }
            tiles.extend(std::iter::repeat(tile).take(run + 1));
            y += run + 1;
        }
        trace!("tile column {x} ends at offset {}", reader.position());
    }
    TileGrid::from_columns(width, height, tiles)
}

/// Reads one stored tile and its repeat count.
pub fn read_tile(reader: &mut ByteReader<'_>, ctx: &SectionContext<'_>) -> CodecResult<(Tile, usize)> {
    let flags = TileFlags::read(reader, ctx.version)?;
    let mut tile = Tile::default();

    if flags.block {
        let id = if flags.wide_block {
            reader.read_u16()?
        } else {
            u16::from(reader.read_u8()?)
        };
        let frame = if ctx.is_important(id) {
            let x = reader.read_i16()?;
            let y = reader.read_i16()?;
            Some(Frame {
                x,
                y: if id == FRAME_Y_RESET_BLOCK { 0 } else { y },
            })
        } else {
            None
        };
        let paint = if flags.block_paint {
            Some(reader.read_u8()?)
        } else {
            None
        };
        tile.block = Some(Block { id, frame, paint });
    }

    if flags.wall {
        let id = u16::from(reader.read_u8()?);
        let paint = if flags.wall_paint {
            Some(reader.read_u8()?)
        } else {
            None
        };
        tile.wall = Some(Wall { id, paint });
    }

    if let Some(kind) = LiquidKind::from_code(flags.liquid, flags.shimmer) {
        tile.liquid = Some(Liquid {
            kind,
            amount: reader.read_u8()?,
        });
    }

    tile.slope = Slope::from_code(flags.slope);
    tile.wiring = Wiring {
        red: flags.red,
        blue: flags.blue,
        green: flags.green,
        yellow: flags.yellow,
    };
    tile.actuator = flags.actuator;
    tile.actuated = flags.actuated;

    if flags.wide_wall {
        let high = u16::from(reader.read_u8()?);
        // A high byte without a wall is consumed and dropped.
        if let Some(wall) = tile.wall.as_mut() {
            wall.id |= high << 8;
        }
    }

    tile.coatings = Coatings {
        invisible_block: flags.invisible_block,
        invisible_wall: flags.invisible_wall,
        fullbright_block: flags.fullbright_block,
        fullbright_wall: flags.fullbright_wall,
    };

    let run = match flags.run {
        RunWidth::None => 0,
        RunWidth::Byte => usize::from(reader.read_u8()?),
        RunWidth::Short => {
            let raw = reader.read_i16()?;
            usize::try_from(raw).map_err(|_| CodecError::InvalidCount {
                what: "tile run",
                count: i64::from(raw),
            })?
        }
    };

    Ok((tile, run))
}

/// Encodes `grid`, which must match the context's dimensions.
///
/// `progress` receives whole percentages of columns written.
pub fn encode_tiles(
    grid: &TileGrid,
    writer: &mut ByteWriter,
    ctx: &SectionContext<'_>,
    progress: Option<&mut dyn FnMut(u8)>,
) -> CodecResult<()> {
    if grid.width != ctx.width || grid.height != ctx.height {
        return Err(CodecError::GridSizeMismatch {
            expected_width: ctx.width,
            expected_height: ctx.height,
            width: grid.width,
            height: grid.height,
        });
    }

    let mut meter = progress.map(|callback| Progress::new(grid.width, callback));
    for (x, column) in grid.columns().enumerate() {
        let mut y = 0;
        while y < column.len() {
            let tile = &column[y];
            let run = column[y + 1..]
                .iter()
                .take(MAX_RUN)
                .take_while(|next| *next == tile)
                .count();
            write_tile(writer, tile, run, ctx)?;
            y += run + 1;
        }
        if let Some(meter) = meter.as_mut() {
            meter.update(x + 1);
        }
    }
    Ok(())
}

/// Encodes an all-air grid of the context's dimensions without building it.
pub fn encode_air(writer: &mut ByteWriter, ctx: &SectionContext<'_>) -> CodecResult<()> {
    let air = Tile::default();
    for _ in 0..ctx.width {
        let mut remaining = ctx.height;
        while remaining > 0 {
            let run = (remaining - 1).min(MAX_RUN);
            write_tile(writer, &air, run, ctx)?;
            remaining -= run + 1;
        }
    }
    Ok(())
}

/// Writes one tile followed by a repeat count of `run`.
pub fn write_tile(
    writer: &mut ByteWriter,
    tile: &Tile,
    run: usize,
    ctx: &SectionContext<'_>,
) -> CodecResult<()> {
    let flags = TileFlags::for_tile(tile, run);
    check_version(&flags, ctx.version)?;
    flags.write(writer);

    if let Some(block) = &tile.block {
        if flags.wide_block {
            writer.write_u16(block.id);
        } else {
            writer.write_u8(low_byte(block.id));
        }
        if ctx.is_important(block.id) {
            let frame = block.frame.unwrap_or_default();
            writer.write_i16(frame.x);
            writer.write_i16(frame.y);
        }
        if let Some(paint) = block.paint {
            writer.write_u8(paint);
        }
    }

    if let Some(wall) = &tile.wall {
        writer.write_u8(low_byte(wall.id));
        if let Some(paint) = wall.paint {
            writer.write_u8(paint);
        }
    }

    if let Some(liquid) = &tile.liquid {
        writer.write_u8(liquid.amount);
    }

    if let Some(wall) = tile.wall.filter(|_| flags.wide_wall) {
        writer.write_u8(low_byte(wall.id >> 8));
    }

    let run_too_long = || CodecError::ValueOutOfRange {
        what: "tile run",
        value: i64::try_from(run).unwrap_or(i64::MAX),
    };
    match flags.run {
        RunWidth::None => {}
        RunWidth::Byte => writer.write_u8(u8::try_from(run).map_err(|_| run_too_long())?),
        RunWidth::Short => writer.write_i16(i16::try_from(run).map_err(|_| run_too_long())?),
    }
    Ok(())
}

fn check_version(flags: &TileFlags, version: i32) -> CodecResult<()> {
    let unsupported = |feature| Err(CodecError::UnsupportedForVersion { feature, version });
    if version < versions::TILE_FLAGS4 {
        if flags.shimmer {
            return unsupported("shimmer liquid");
        }
        if flags.has_flags4() {
            return unsupported("tile coatings");
        }
    }
    if version < versions::WALL_HIGH_BYTE && flags.wide_wall {
        return unsupported("wall id above 255");
    }
    Ok(())
}

const fn low_byte(value: u16) -> u8 {
    (value & 0xFF) as u8
}
