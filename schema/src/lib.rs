//! Version-gated field tables for world file headers.
//!
//! The world header is a flat run of values whose presence depends on the
//! format version. This crate describes that run as data:
//! - [`FieldKind`]: how one value is stored
//! - [`VersionGate`]: which versions store it
//! - [`WORLD_HEADER`]: the ordered table the codec walks
//!
//! # Design Principles
//!
//! - **Tables, not code** - adding a field means adding a row.
//! - **One definition per version** - a name may be redefined with a
//!   different kind, but gates must never overlap ([`Schema::validate`]).
//! - **No I/O** - reading and writing values belongs to the codec.

mod error;
mod field;
mod gate;
mod schema;
mod world_header;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldKind};
pub use gate::VersionGate;
pub use schema::Schema;
pub use world_header::{names, WORLD_HEADER};
