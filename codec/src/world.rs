//! Whole-world decoding and encoding.

use cursor::{ByteReader, ByteWriter};
use format::{FileFormatHeader, PointerTable, SectionKind, SectionSet};
use log::{debug, warn};
use schema::names;

use crate::bestiary::{decode_bestiary, encode_bestiary, Bestiary};
use crate::chests::{decode_chests, encode_chests, Chest};
use crate::context::SectionContext;
use crate::creative::{
    decode_creative_powers, encode_creative_powers, encode_no_creative_powers, CreativePowers,
};
use crate::error::{CodecError, CodecResult, Stage, WorldError, WorldResult};
use crate::footer::{decode_footer, encode_footer, Footer};
use crate::header::{decode_header, encode_header, WorldHeader};
use crate::npcs::{decode_npcs, encode_npcs, Npc};
use crate::options::{DecodeOptions, EncodeOptions};
use crate::pressure_plates::{decode_pressure_plates, encode_pressure_plates, PressurePlate};
use crate::rooms::{decode_rooms, encode_rooms, Room};
use crate::signs::{decode_signs, encode_signs, Sign};
use crate::tile_entities::{decode_tile_entities, encode_tile_entities, TileEntity};
use crate::tiles::{decode_tiles, encode_air, encode_tiles, TileGrid};

/// A decoded world.
///
/// The file-format header and the world header are always present. Every
/// other section is `None` when it was not selected for decoding or does
/// not exist at the file's version.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct World {
    pub file_format_header: FileFormatHeader,
    pub header: WorldHeader,
    pub tiles: Option<TileGrid>,
    pub chests: Option<Vec<Chest>>,
    pub signs: Option<Vec<Sign>>,
    pub npcs: Option<Vec<Npc>>,
    pub tile_entities: Option<Vec<TileEntity>>,
    pub pressure_plates: Option<Vec<PressurePlate>>,
    pub rooms: Option<Vec<Room>>,
    pub bestiary: Option<Bestiary>,
    pub creative_powers: Option<CreativePowers>,
    pub footer: Option<Footer>,
}

impl World {
    /// Creates a world with the given headers and no decoded sections.
    #[must_use]
    pub const fn from_headers(file_format_header: FileFormatHeader, header: WorldHeader) -> Self {
        Self {
            file_format_header,
            header,
            tiles: None,
            chests: None,
            signs: None,
            npcs: None,
            tile_entities: None,
            pressure_plates: None,
            rooms: None,
            bestiary: None,
            creative_powers: None,
            footer: None,
        }
    }

    /// Creates an empty world of `width` by `height` tiles at `version`.
    ///
    /// Every header field takes its zero value and the importance table is
    /// empty, so no block stores a frame.
    #[must_use]
    pub fn new(version: i32, width: i32, height: i32) -> Self {
        let mut header = WorldHeader::with_defaults(version);
        header.set(names::MAX_TILES_X, width);
        header.set(names::MAX_TILES_Y, height);
        Self::from_headers(FileFormatHeader::new(version, Vec::new()), header)
    }

    /// The format version.
    #[must_use]
    pub const fn version(&self) -> i32 {
        self.file_format_header.version
    }

    /// Returns `true` if `kind` holds decoded data.
    #[must_use]
    pub const fn has_section(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::FileFormatHeader | SectionKind::Header => true,
            SectionKind::Tiles => self.tiles.is_some(),
            SectionKind::Chests => self.chests.is_some(),
            SectionKind::Signs => self.signs.is_some(),
            SectionKind::Npcs => self.npcs.is_some(),
            SectionKind::TileEntities => self.tile_entities.is_some(),
            SectionKind::PressurePlates => self.pressure_plates.is_some(),
            SectionKind::Rooms => self.rooms.is_some(),
            SectionKind::Bestiary => self.bestiary.is_some(),
            SectionKind::CreativePowers => self.creative_powers.is_some(),
            SectionKind::Footer => self.footer.is_some(),
        }
    }

    /// The set of sections holding data.
    #[must_use]
    pub fn present_sections(&self) -> SectionSet {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| self.has_section(*kind))
            .collect()
    }

    /// Lists the sections whose contents differ from `other`'s.
    ///
    /// Pointer offsets are not compared.
    #[must_use]
    pub fn differing_sections(&self, other: &Self) -> Vec<SectionKind> {
        let checks = [
            (
                SectionKind::FileFormatHeader,
                self.file_format_header == other.file_format_header,
            ),
            (SectionKind::Header, self.header == other.header),
            (SectionKind::Tiles, self.tiles == other.tiles),
            (SectionKind::Chests, self.chests == other.chests),
            (SectionKind::Signs, self.signs == other.signs),
            (SectionKind::Npcs, self.npcs == other.npcs),
            (SectionKind::TileEntities, self.tile_entities == other.tile_entities),
            (
                SectionKind::PressurePlates,
                self.pressure_plates == other.pressure_plates,
            ),
            (SectionKind::Rooms, self.rooms == other.rooms),
            (SectionKind::Bestiary, self.bestiary == other.bestiary),
            (
                SectionKind::CreativePowers,
                self.creative_powers == other.creative_powers,
            ),
            (SectionKind::Footer, self.footer == other.footer),
        ];
        checks
            .into_iter()
            .filter(|(_, equal)| !equal)
            .map(|(kind, _)| kind)
            .collect()
    }
}

/// Decodes every section of a world file.
pub fn decode_world(bytes: &[u8]) -> WorldResult<World> {
    decode_world_with(bytes, DecodeOptions::default())
}

/// Decodes a world file with the given options.
///
/// The file-format header is read in the loading stage; a failure there
/// means the buffer is not a supported world file. Everything after it is
/// read in the parsing stage. Each selected section is read from its
/// recorded pointer and must end where the next one begins, unless
/// pointer checks are disabled.
pub fn decode_world_with<'a>(bytes: &'a [u8], options: DecodeOptions<'a>) -> WorldResult<World> {
    let DecodeOptions {
        sections,
        ignore_pointers,
        limits,
        format_limits,
        on_progress,
    } = options;
    let mut reader = match on_progress {
        Some(callback) => ByteReader::with_progress(bytes, callback),
        None => ByteReader::new(bytes),
    };

    let file_format_header = FileFormatHeader::decode(&mut reader, &format_limits)
        .map_err(|err| WorldError::new(Stage::Loading, err))?;
    let table = PointerTable::new(&file_format_header.pointers);
    debug!(
        "world version {} with {} section pointers",
        file_format_header.version,
        file_format_header.pointers.len()
    );
    finish_section(
        &reader,
        &table,
        SectionKind::FileFormatHeader,
        0,
        ignore_pointers,
    )
    .map_err(|err| WorldError::new(Stage::Loading, err))?;

    let mut walk = SectionWalk {
        reader,
        table,
        ignore_pointers,
    };
    walk.decode(file_format_header, sections, &limits)
        .map_err(|err| WorldError::new(Stage::Parsing, err))
}

struct SectionWalk<'a> {
    reader: ByteReader<'a>,
    table: PointerTable,
    ignore_pointers: bool,
}

impl SectionWalk<'_> {
    fn decode(
        &mut self,
        file_format_header: FileFormatHeader,
        sections: SectionSet,
        limits: &crate::limits::CodecLimits,
    ) -> CodecResult<World> {
        let version = file_format_header.version;
        let layout = SectionKind::layout(version);

        self.enter(SectionKind::Header, 1)?;
        let header = decode_header(&mut self.reader, version, limits)?;
        self.leave(SectionKind::Header, 1)?;

        let mut world = World::from_headers(file_format_header, header);
        let (width, height) = world
            .header
            .dimensions()
            .ok_or(CodecError::MissingField {
                name: names::MAX_TILES_X,
            })?;
        let ctx = SectionContext::new(
            version,
            &world.file_format_header.importance,
            width,
            height,
            limits,
        )?;

        for (index, &kind) in layout.iter().enumerate().skip(2) {
            if !sections.contains(kind) {
                continue;
            }
            self.enter(kind, index)?;
            let reader = &mut self.reader;
            match kind {
                SectionKind::Tiles => world.tiles = Some(decode_tiles(reader, &ctx)?),
                SectionKind::Chests => world.chests = Some(decode_chests(reader, &ctx)?),
                SectionKind::Signs => world.signs = Some(decode_signs(reader, &ctx)?),
                SectionKind::Npcs => world.npcs = Some(decode_npcs(reader, &ctx)?),
                SectionKind::TileEntities => {
                    world.tile_entities = Some(decode_tile_entities(reader, &ctx)?);
                }
                SectionKind::PressurePlates => {
                    world.pressure_plates = Some(decode_pressure_plates(reader, &ctx)?);
                }
                SectionKind::Rooms => world.rooms = Some(decode_rooms(reader, &ctx)?),
                SectionKind::Bestiary => world.bestiary = Some(decode_bestiary(reader, &ctx)?),
                SectionKind::CreativePowers => {
                    world.creative_powers = Some(decode_creative_powers(reader)?);
                }
                SectionKind::Footer => world.footer = Some(decode_footer(reader, &world.header)?),
                SectionKind::FileFormatHeader | SectionKind::Header => {}
            }
            self.leave(kind, index)?;
        }
        Ok(world)
    }

    fn enter(&mut self, kind: SectionKind, index: usize) -> CodecResult<()> {
        let start = self.table.require_start(kind, index)?;
        debug!("{kind} starts at offset {start}");
        self.reader.jump(start)?;
        Ok(())
    }

    fn leave(&self, kind: SectionKind, index: usize) -> CodecResult<()> {
        debug!("{kind} ends at offset {}", self.reader.position());
        finish_section(&self.reader, &self.table, kind, index, self.ignore_pointers)
    }
}

fn finish_section(
    reader: &ByteReader<'_>,
    table: &PointerTable,
    kind: SectionKind,
    index: usize,
    ignore_pointers: bool,
) -> CodecResult<()> {
    match table.check_end(kind, index, reader.position(), reader.len()) {
        Ok(()) => Ok(()),
        Err(err) if ignore_pointers => {
            warn!("ignoring {err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Encodes every section of `world`.
pub fn encode_world(world: &World) -> WorldResult<Vec<u8>> {
    encode_world_with(world, EncodeOptions::default())
}

/// Encodes `world` with the given options.
///
/// Sections are written in layout order and the pointer table is patched
/// once every offset is known. Unselected or absent sections are written
/// in their empty form; the footer is always derived from the header.
pub fn encode_world_with(world: &World, options: EncodeOptions<'_>) -> WorldResult<Vec<u8>> {
    write_world(world, options).map_err(|err| WorldError::new(Stage::Saving, err))
}

fn write_world(world: &World, options: EncodeOptions<'_>) -> CodecResult<Vec<u8>> {
    let EncodeOptions {
        sections,
        limits,
        mut on_progress,
    } = options;
    let file_format_header = &world.file_format_header;
    let version = file_format_header.version;

    let mut writer = ByteWriter::new();
    let slot = file_format_header.encode(&mut writer)?;

    let (width, height) = world.header.dimensions().ok_or(CodecError::MissingField {
        name: names::MAX_TILES_X,
    })?;
    let ctx = SectionContext::new(
        version,
        &file_format_header.importance,
        width,
        height,
        &limits,
    )?;

    let layout = SectionKind::layout(version);
    let mut offsets = Vec::with_capacity(slot.count());
    for &kind in &layout[1..] {
        offsets.push(writer.position());
        let selected = sections.contains(kind);
        debug!("writing {kind} at offset {}", writer.position());
        match kind {
            SectionKind::Header => encode_header(&world.header, &mut writer, version)?,
            SectionKind::Tiles => match pick(world.tiles.as_ref(), selected) {
                Some(grid) => encode_tiles(grid, &mut writer, &ctx, on_progress.take())?,
                None => encode_air(&mut writer, &ctx)?,
            },
            SectionKind::Chests => encode_chests(
                pick(world.chests.as_deref(), selected).unwrap_or_default(),
                &mut writer,
            )?,
            SectionKind::Signs => encode_signs(
                pick(world.signs.as_deref(), selected).unwrap_or_default(),
                &mut writer,
            )?,
            SectionKind::Npcs => encode_npcs(
                pick(world.npcs.as_deref(), selected).unwrap_or_default(),
                &mut writer,
                version,
            )?,
            SectionKind::TileEntities => encode_tile_entities(
                pick(world.tile_entities.as_deref(), selected).unwrap_or_default(),
                &mut writer,
            )?,
            SectionKind::PressurePlates => encode_pressure_plates(
                pick(world.pressure_plates.as_deref(), selected).unwrap_or_default(),
                &mut writer,
            )?,
            SectionKind::Rooms => encode_rooms(
                pick(world.rooms.as_deref(), selected).unwrap_or_default(),
                &mut writer,
            )?,
            SectionKind::Bestiary => match pick(world.bestiary.as_ref(), selected) {
                Some(bestiary) => encode_bestiary(bestiary, &mut writer)?,
                None => encode_bestiary(&Bestiary::default(), &mut writer)?,
            },
            SectionKind::CreativePowers => match pick(world.creative_powers.as_ref(), selected) {
                Some(powers) => encode_creative_powers(powers, &mut writer),
                None => encode_no_creative_powers(&mut writer),
            },
            SectionKind::Footer => encode_footer(&world.header, &mut writer)?,
            SectionKind::FileFormatHeader => {}
        }
    }

    // Legacy layouts keep a trailing zero pointer.
    offsets.resize(slot.count(), 0);
    debug!("backpatching {} section pointers", offsets.len());
    slot.backpatch(&mut writer, &offsets)?;
    Ok(writer.finish())
}

fn pick<T: ?Sized>(section: Option<&T>, selected: bool) -> Option<&T> {
    section.filter(|_| selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tile::Tile;
    use format::{FormatError, Magic};

    fn sample(version: i32) -> World {
        let mut world = World::new(version, 2, 2);
        world.header.set(names::MAP_NAME, "Tiny");
        world.header.set(names::WORLD_ID, 77);
        let mut grid = TileGrid::new(2, 2);
        if let Some(tile) = grid.get_mut(0, 0) {
            *tile = Tile::with_block(1);
        }
        world.tiles = Some(grid);
        world.chests = Some(Vec::new());
        world.signs = Some(Vec::new());
        world.npcs = Some(Vec::new());
        world.tile_entities = Some(Vec::new());
        world.pressure_plates = Some(Vec::new());
        world.rooms = Some(Vec::new());
        if version >= format::versions::BESTIARY {
            world.bestiary = Some(Bestiary::default());
            world.creative_powers = Some(CreativePowers::default());
        }
        world.footer = Some(Footer {
            name: "Tiny".to_owned(),
            world_id: 77,
        });
        world
    }

    #[test]
    fn small_world_round_trips() {
        for version in [194, 225, 279] {
            let world = sample(version);
            let bytes = encode_world(&world).unwrap();
            let decoded = decode_world(&bytes).unwrap();
            assert!(
                world.differing_sections(&decoded).is_empty(),
                "version {version}: {:?}",
                world.differing_sections(&decoded)
            );
        }
    }

    #[test]
    fn legacy_layout_has_trailing_zero_pointer() {
        let bytes = encode_world(&sample(194)).unwrap();
        let decoded = decode_world(&bytes).unwrap();
        let pointers = &decoded.file_format_header.pointers;
        assert_eq!(pointers.len(), 10);
        assert_eq!(pointers[9], 0);
        assert!(decoded.bestiary.is_none());
        assert!(decoded.creative_powers.is_none());
    }

    #[test]
    fn section_filter_leaves_others_empty() {
        let bytes = encode_world(&sample(279)).unwrap();
        let sections = SectionSet::empty().with(SectionKind::Tiles);
        let decoded = decode_world_with(&bytes, DecodeOptions::new().sections(sections)).unwrap();
        assert!(decoded.tiles.is_some());
        assert!(decoded.chests.is_none());
        assert!(decoded.footer.is_none());
        assert_eq!(
            decoded.present_sections(),
            SectionSet::empty()
                .with(SectionKind::FileFormatHeader)
                .with(SectionKind::Header)
                .with(SectionKind::Tiles)
        );
    }

    #[test]
    fn absent_sections_encode_as_empty() {
        let world = World::new(279, 3, 4);
        let bytes = encode_world(&world).unwrap();
        let decoded = decode_world(&bytes).unwrap();
        let tiles = decoded.tiles.unwrap();
        assert_eq!(tiles.count_non_air(), 0);
        assert_eq!((tiles.width(), tiles.height()), (3, 4));
        assert_eq!(decoded.chests, Some(Vec::new()));
        assert_eq!(decoded.creative_powers, Some(CreativePowers::default()));
    }

    #[test]
    fn bad_magic_is_a_malformed_header() {
        let mut bytes = encode_world(&sample(279)).unwrap();
        bytes[4..11].copy_from_slice(b"garbage");
        let err = decode_world(&bytes).unwrap_err();
        assert_eq!(err.stage, Stage::Loading);
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn old_version_is_unsupported() {
        let mut bytes = encode_world(&sample(194)).unwrap();
        bytes[0..4].copy_from_slice(&193i32.to_le_bytes());
        let err = decode_world(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
        assert!(matches!(
            err.error,
            CodecError::Format(FormatError::UnsupportedVersion { found: 193, .. })
        ));
    }

    #[test]
    fn truncated_prefix_is_a_malformed_header() {
        let err = decode_world(&[0xC2, 0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn mobile_magic_survives() {
        let mut world = sample(279);
        world.file_format_header.magic = Magic::Mobile;
        let decoded = decode_world(&encode_world(&world).unwrap()).unwrap();
        assert!(decoded.file_format_header.is_android());
    }

    #[test]
    fn encode_rejects_grid_of_wrong_size() {
        let mut world = sample(279);
        world.tiles = Some(TileGrid::new(3, 2));
        let err = encode_world(&world).unwrap_err();
        assert_eq!(err.stage, Stage::Saving);
        assert!(matches!(err.error, CodecError::GridSizeMismatch { .. }));
    }

    #[test]
    fn progress_reaches_one_hundred() {
        let bytes = encode_world(&sample(279)).unwrap();
        let mut seen = Vec::new();
        let mut record = |percent: u8| seen.push(percent);
        decode_world_with(&bytes, DecodeOptions::new().on_progress(&mut record)).unwrap();
        assert_eq!(seen.last(), Some(&100));
    }
}
