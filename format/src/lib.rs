//! File-format header, section layout and pointer table for the wld world codec.
//!
//! This crate handles the framing of a world file: the magic and version
//! prefix, the section pointer table, the tile importance table and the
//! version-dependent list of sections. It does not know what is inside a
//! section, only where each one starts and ends.
//!
//! # Design Principles
//!
//! - **Exact layout** - Offsets are checked against the recorded pointer table.
//! - **Bounded decoding** - All length fields are validated against limits before iteration.
//! - **No domain knowledge** - This crate handles framing, not tiles or entities.
//!
//! See `FILE_FORMAT.md` for the byte-level layout.

mod error;
mod header;
mod limits;
mod pointers;
mod sections;
pub mod versions;

pub use error::{FormatError, FormatResult, LimitKind};
pub use header::{
    FileFormatHeader, Magic, FILE_TYPE_WORLD, MAGIC_DESKTOP, MAGIC_MOBILE, RESERVED_BYTES,
};
pub use limits::Limits;
pub use pointers::{PointerSlot, PointerTable};
pub use sections::{pointer_count, SectionKind, SectionSet};
