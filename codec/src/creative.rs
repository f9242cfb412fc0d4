//! Journey-mode power toggles.
//!
//! Each record is `true`, an `i16` power id, then a value whose type
//! depends on the id. A single `false` closes the list.

use cursor::{ByteReader, ByteWriter};

use crate::error::{CodecError, CodecResult};

const FREEZE_TIME: i16 = 0;
const TIME_RATE: i16 = 8;
const FREEZE_RAIN: i16 = 9;
const FREEZE_WIND: i16 = 10;
const DIFFICULTY: i16 = 12;
const STOP_BIOME_SPREAD: i16 = 13;

/// Creative power state. Present from version 225.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreativePowers {
    pub freeze_time: bool,
    pub time_rate: f32,
    pub freeze_rain: bool,
    pub freeze_wind: bool,
    pub difficulty: f32,
    pub stop_biome_spread: bool,
}

impl Default for CreativePowers {
    fn default() -> Self {
        Self {
            freeze_time: false,
            time_rate: 1.0,
            freeze_rain: false,
            freeze_wind: false,
            difficulty: 0.0,
            stop_biome_spread: false,
        }
    }
}

/// Reads power records until the closing `false`.
///
/// Powers missing from the list keep their defaults.
pub fn decode_creative_powers(reader: &mut ByteReader<'_>) -> CodecResult<CreativePowers> {
    let mut powers = CreativePowers::default();
    while reader.read_bool()? {
        match reader.read_i16()? {
            FREEZE_TIME => powers.freeze_time = reader.read_bool()?,
            TIME_RATE => powers.time_rate = reader.read_f32()?,
            FREEZE_RAIN => powers.freeze_rain = reader.read_bool()?,
            FREEZE_WIND => powers.freeze_wind = reader.read_bool()?,
            DIFFICULTY => powers.difficulty = reader.read_f32()?,
            STOP_BIOME_SPREAD => powers.stop_biome_spread = reader.read_bool()?,
            id => return Err(CodecError::UnknownCreativePower { id }),
        }
    }
    Ok(powers)
}

/// Writes all six powers followed by the terminator.
pub fn encode_creative_powers(powers: &CreativePowers, writer: &mut ByteWriter) {
    write_record(writer, FREEZE_TIME);
    writer.write_bool(powers.freeze_time);
    write_record(writer, TIME_RATE);
    writer.write_f32(powers.time_rate);
    write_record(writer, FREEZE_RAIN);
    writer.write_bool(powers.freeze_rain);
    write_record(writer, FREEZE_WIND);
    writer.write_bool(powers.freeze_wind);
    write_record(writer, DIFFICULTY);
    writer.write_f32(powers.difficulty);
    write_record(writer, STOP_BIOME_SPREAD);
    writer.write_bool(powers.stop_biome_spread);
    writer.write_bool(false);
}

fn write_record(writer: &mut ByteWriter, id: i16) {
    writer.write_bool(true);
    writer.write_i16(id);
}

/// Writes the terminator alone.
pub fn encode_no_creative_powers(writer: &mut ByteWriter) {
    writer.write_bool(false);
}
