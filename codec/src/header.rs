//! The world header: a version-gated run of named values.
//!
//! Decoding and encoding walk [`schema::WORLD_HEADER`] in order, so the
//! header model is a flat list of `(name, value)` pairs in stored order.

use cursor::{ByteReader, ByteWriter};
use log::trace;
use schema::{names, FieldDef, FieldKind, Schema};

use crate::context::{check_count, write_count_i16, write_count_i32};
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;

/// A decoded header value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum FieldValue {
    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    I32List(Vec<i32>),
    StrList(Vec<String>),
}

impl FieldValue {
    /// Returns the zero value stored for `kind`.
    #[must_use]
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Bool(false),
            FieldKind::U8 | FieldKind::MoonType => Self::U8(0),
            FieldKind::I16 => Self::I16(0),
            FieldKind::I32 => Self::I32(0),
            FieldKind::F32 => Self::F32(0.0),
            FieldKind::F64 => Self::F64(0.0),
            FieldKind::Str => Self::Str(String::new()),
            FieldKind::Bytes(len) => Self::Bytes(vec![0; len]),
            FieldKind::I32Array(len) => Self::I32List(vec![0; len]),
            FieldKind::I32List | FieldKind::I32ShortList => Self::I32List(Vec::new()),
            FieldKind::StrList => Self::StrList(Vec::new()),
        }
    }

    /// Returns a short type name for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::I32List(_) => "i32 list",
            Self::StrList(_) => "string list",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// The world header.
///
/// Entries keep the order they were decoded or inserted in. Encoding looks
/// fields up by name, so order only matters for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldHeader {
    entries: Vec<(&'static str, FieldValue)>,
}

impl WorldHeader {
    /// Creates an empty header.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a header with a zero value for every field stored at
    /// `version`.
    #[must_use]
    pub fn with_defaults(version: i32) -> Self {
        let entries = Schema::world_header()
            .fields_at(version)
            .map(|field| (field.name, FieldValue::zero(field.kind)))
            .collect();
        Self { entries }
    }

    /// Returns the value named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns a boolean field.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns an `i32` field.
    #[must_use]
    pub fn i32(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            FieldValue::I32(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a string field.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The world's display name.
    #[must_use]
    pub fn map_name(&self) -> Option<&str> {
        self.str(names::MAP_NAME)
    }

    /// The world's numeric id.
    #[must_use]
    pub fn world_id(&self) -> Option<i32> {
        self.i32(names::WORLD_ID)
    }

    /// Width and height in tiles.
    #[must_use]
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        Some((
            self.i32(names::MAX_TILES_X)?,
            self.i32(names::MAX_TILES_Y)?,
        ))
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the header holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WorldHeader {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Reads the world header stored at `version`.
pub fn decode_header(
    reader: &mut ByteReader<'_>,
    version: i32,
    limits: &CodecLimits,
) -> CodecResult<WorldHeader> {
    let mut header = WorldHeader::new();
    for field in Schema::world_header().fields_at(version) {
        let value = read_field(reader, field, limits)?;
        trace!("header field {} = {value:?}", field.name);
        header.entries.push((field.name, value));
    }
    Ok(header)
}

/// Writes every field stored at `version`, looked up by name.
pub fn encode_header(header: &WorldHeader, writer: &mut ByteWriter, version: i32) -> CodecResult<()> {
    for field in Schema::world_header().fields_at(version) {
        let value = header
            .get(field.name)
            .ok_or(CodecError::MissingField { name: field.name })?;
        write_field(writer, field, value, version)?;
    }
    Ok(())
}

fn read_field(
    reader: &mut ByteReader<'_>,
    field: &FieldDef,
    limits: &CodecLimits,
) -> CodecResult<FieldValue> {
    let value = match field.kind {
        FieldKind::Bool => FieldValue::Bool(reader.read_bool()?),
        FieldKind::U8 | FieldKind::MoonType => FieldValue::U8(reader.read_u8()?),
        FieldKind::I16 => FieldValue::I16(reader.read_i16()?),
        FieldKind::I32 => FieldValue::I32(reader.read_i32()?),
        FieldKind::F32 => FieldValue::F32(reader.read_f32()?),
        FieldKind::F64 => FieldValue::F64(reader.read_f64()?),
        FieldKind::Str => FieldValue::Str(reader.read_string()?),
        FieldKind::Bytes(len) => FieldValue::Bytes(reader.read_bytes(len)?.to_vec()),
        FieldKind::I32Array(len) => FieldValue::I32List(read_i32s(reader, len)?),
        FieldKind::I32List => {
            let len = list_len(field, i64::from(reader.read_i32()?), limits)?;
            FieldValue::I32List(read_i32s(reader, len)?)
        }
        FieldKind::I32ShortList => {
            let len = list_len(field, i64::from(reader.read_i16()?), limits)?;
            FieldValue::I32List(read_i32s(reader, len)?)
        }
        FieldKind::StrList => {
            let len = list_len(field, i64::from(reader.read_i32()?), limits)?;
            let strings = (0..len)
                .map(|_| reader.read_string())
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::StrList(strings)
        }
    };
    Ok(value)
}

fn list_len(field: &FieldDef, count: i64, limits: &CodecLimits) -> CodecResult<usize> {
    check_count(field.name, count, LimitKind::ListLength, limits.max_list_len)
}

fn read_i32s(reader: &mut ByteReader<'_>, len: usize) -> CodecResult<Vec<i32>> {
    Ok((0..len)
        .map(|_| reader.read_i32())
        .collect::<Result<Vec<_>, _>>()?)
}

fn write_field(
    writer: &mut ByteWriter,
    field: &FieldDef,
    value: &FieldValue,
    version: i32,
) -> CodecResult<()> {
    match (field.kind, value) {
        (FieldKind::Bool, FieldValue::Bool(v)) => writer.write_bool(*v),
        (FieldKind::U8, FieldValue::U8(v)) => writer.write_u8(*v),
        (FieldKind::MoonType, FieldValue::U8(v)) => writer.write_u8(clamp_moon_type(*v, version)),
        (FieldKind::I16, FieldValue::I16(v)) => writer.write_i16(*v),
        (FieldKind::I32, FieldValue::I32(v)) => writer.write_i32(*v),
        (FieldKind::F32, FieldValue::F32(v)) => writer.write_f32(*v),
        (FieldKind::F64, FieldValue::F64(v)) => writer.write_f64(*v),
        (FieldKind::Str, FieldValue::Str(v)) => writer.write_string(v)?,
        (FieldKind::Bytes(len), FieldValue::Bytes(bytes)) => {
            check_len(field, len, bytes.len())?;
            writer.write_bytes(bytes);
        }
        (FieldKind::I32Array(len), FieldValue::I32List(values)) => {
            check_len(field, len, values.len())?;
            values.iter().for_each(|v| writer.write_i32(*v));
        }
        (FieldKind::I32List, FieldValue::I32List(values)) => {
            write_count_i32(writer, field.name, values.len())?;
            values.iter().for_each(|v| writer.write_i32(*v));
        }
        (FieldKind::I32ShortList, FieldValue::I32List(values)) => {
            write_count_i16(writer, field.name, values.len())?;
            values.iter().for_each(|v| writer.write_i32(*v));
        }
        (FieldKind::StrList, FieldValue::StrList(values)) => {
            write_count_i32(writer, field.name, values.len())?;
            for v in values {
                writer.write_string(v)?;
            }
        }
        (kind, value) => {
            return Err(CodecError::FieldTypeMismatch {
                name: field.name,
                expected: kind.name(),
                found: value.type_name(),
            })
        }
    }
    Ok(())
}

fn check_len(field: &FieldDef, expected: usize, actual: usize) -> CodecResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CodecError::FieldLength {
            name: field.name,
            expected,
            actual,
        })
    }
}

/// Restricts a moon style to the range the target version understands.
#[must_use]
pub const fn clamp_moon_type(value: u8, version: i32) -> u8 {
    let max = if version >= format::versions::WIDE_MOON_TYPES {
        9
    } else if version >= format::versions::CLASSIC_MOON_TYPES {
        3
    } else {
        return 0;
    };
    if value > max {
        0
    } else {
        value
    }
}
