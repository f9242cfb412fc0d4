//! World decoding and encoding for the wld world codec.
//!
//! This is the main codec crate that ties together cursor, format, and
//! schema to read and write complete world files.
//!
//! # Features
//!
//! - Schema-driven world header
//! - Run-length tile grid with cascading flag bytes
//! - Chests, signs, NPCs, tile entities, pressure plates, rooms
//! - Bestiary and creative powers (version 225 and later)
//! - Section selection, pointer checks and progress reporting
//!
//! # Design Principles
//!
//! - **Explicit context** - Version, importance table and dimensions are
//!   passed to each section codec, never held globally.
//! - **Bounded decoding** - Counts are validated against [`CodecLimits`]
//!   before iteration.
//! - **Always loadable** - Encoding writes every section of the layout,
//!   in its empty form when the model has none.
//!
//! # Example
//!
//! ```
//! use codec::{decode_world, encode_world, World};
//!
//! let world = World::new(279, 4, 3);
//! let bytes = encode_world(&world).unwrap();
//! let decoded = decode_world(&bytes).unwrap();
//! assert_eq!(decoded.tiles.unwrap().count_non_air(), 0);
//! ```

mod bestiary;
mod chests;
mod context;
mod creative;
mod error;
mod footer;
mod header;
mod limits;
mod npcs;
mod options;
mod pressure_plates;
mod rooms;
mod signs;
mod tile;
mod tile_entities;
mod tile_flags;
mod tiles;
mod types;
mod world;

pub use bestiary::{decode_bestiary, encode_bestiary, Bestiary, KillCount};
pub use chests::{decode_chests, encode_chests, Chest, ChestItem, CHEST_SLOTS};
pub use context::SectionContext;
pub use creative::{
    decode_creative_powers, encode_creative_powers, encode_no_creative_powers, CreativePowers,
};
pub use error::{CodecError, CodecResult, ErrorKind, LimitKind, Stage, WorldError, WorldResult};
pub use footer::{decode_footer, encode_footer, Footer};
pub use header::{clamp_moon_type, decode_header, encode_header, FieldValue, WorldHeader};
pub use limits::CodecLimits;
pub use npcs::{
    decode_npcs, encode_npcs, legacy_npc_id, legacy_npc_name, Npc, PillarNpc, TownNpc,
    LEGACY_NPC_NAMES,
};
pub use options::{DecodeOptions, EncodeOptions};
pub use pressure_plates::{decode_pressure_plates, encode_pressure_plates, PressurePlate};
pub use rooms::{decode_rooms, encode_rooms, Room};
pub use signs::{decode_signs, encode_signs, Sign};
pub use tile::{Block, Coatings, Frame, Liquid, LiquidKind, Slope, Tile, Wall, Wiring};
pub use tile_entities::{
    decode_tile_entities, encode_tile_entities, SlotItem, TileEntity, TileEntityPayload,
    DOLL_SLOTS, HAT_RACK_SLOTS,
};
pub use tile_flags::{RunWidth, TileFlags};
pub use tiles::{
    decode_tiles, encode_air, encode_tiles, read_tile, write_tile, TileGrid, FRAME_Y_RESET_BLOCK,
    MAX_RUN,
};
pub use types::Position;
pub use world::{
    decode_world, decode_world_with, encode_world, encode_world_with, World,
};

pub use format::{FileFormatHeader, Limits as FormatLimits, Magic, SectionKind, SectionSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = CodecLimits::default();
        let _ = FormatLimits::default();
        let _ = DecodeOptions::new();
        let _ = EncodeOptions::new();
        let _ = SectionSet::all();
        let _ = Tile::default();
        let _ = CreativePowers::default();

        // Error types
        let _: CodecResult<()> = Ok(());
        let _: WorldResult<()> = Ok(());
    }

    #[test]
    fn position_usage() {
        let position: Position<i32> = (3, 4).into();
        assert_eq!(position, Position::new(3, 4));
    }

    #[test]
    fn world_version_accessor() {
        let world = World::new(194, 1, 1);
        assert_eq!(world.version(), 194);
        assert!(world.has_section(SectionKind::Header));
        assert!(!world.has_section(SectionKind::Tiles));
    }
}
