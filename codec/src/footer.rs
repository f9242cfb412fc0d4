//! The closing footer: a sentinel, the world name and the world id.

use cursor::{ByteReader, ByteWriter};

use crate::error::{CodecError, CodecResult};
use crate::header::WorldHeader;

/// The decoded footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Footer {
    pub name: String,
    pub world_id: i32,
}

impl Footer {
    /// Builds the footer a header implies.
    pub fn from_header(header: &WorldHeader) -> CodecResult<Self> {
        let name = header
            .map_name()
            .ok_or(CodecError::MissingField {
                name: schema::names::MAP_NAME,
            })?
            .to_owned();
        let world_id = header.world_id().ok_or(CodecError::MissingField {
            name: schema::names::WORLD_ID,
        })?;
        Ok(Self { name, world_id })
    }
}

/// Reads the footer and checks it against `header`.
pub fn decode_footer(reader: &mut ByteReader<'_>, header: &WorldHeader) -> CodecResult<Footer> {
    if !reader.read_bool()? {
        return Err(CodecError::FooterMismatch { field: "sentinel" });
    }
    let footer = Footer {
        name: reader.read_string()?,
        world_id: reader.read_i32()?,
    };
    if header.map_name() != Some(footer.name.as_str()) {
        return Err(CodecError::FooterMismatch { field: "name" });
    }
    if header.world_id() != Some(footer.world_id) {
        return Err(CodecError::FooterMismatch { field: "world id" });
    }
    Ok(footer)
}

pub fn encode_footer(header: &WorldHeader, writer: &mut ByteWriter) -> CodecResult<()> {
    let footer = Footer::from_header(header)?;
    writer.write_bool(true);
    writer.write_string(&footer.name)?;
    writer.write_i32(footer.world_id);
    Ok(())
}
