//! Format versions at which the file layout changes.
//!
//! Header-field thresholds live in the schema table; these are the ones
//! that reshape sections or the file-format header itself.

/// Oldest format version the codec accepts.
pub const MIN_SUPPORTED: i32 = 194;

/// Town NPC records carry a numeric id instead of a legacy display name.
pub const NPC_NUMERIC_IDS: i32 = 190;

/// Town NPC records carry an optional sprite variation.
pub const NPC_VARIATIONS: i32 = 213;

/// Wall ids may carry a second, high byte.
pub const WALL_HIGH_BYTE: i32 = 222;

/// Bestiary and creative-powers sections exist and the pointer table grows to 11.
pub const BESTIARY: i32 = 225;

/// Moon type accepts the wider 0..=9 range.
pub const WIDE_MOON_TYPES: i32 = 226;

/// Moon type accepts the classic 0..=3 range.
pub const CLASSIC_MOON_TYPES: i32 = 69;

/// Tiles gain the fourth flag byte and the shimmer liquid.
pub const TILE_FLAGS4: i32 = 269;
