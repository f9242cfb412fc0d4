use codec::{decode_header, encode_header, CodecError, CodecLimits, FieldValue, WorldHeader};
use cursor::{ByteReader, ByteWriter};
use proptest::prelude::*;
use schema::names;

fn round_trip(header: &WorldHeader, version: i32) -> WorldHeader {
    let mut writer = ByteWriter::new();
    encode_header(header, &mut writer, version).unwrap();
    let bytes = writer.finish();
    let mut reader = ByteReader::new(&bytes);
    let decoded = decode_header(&mut reader, version, &CodecLimits::default()).unwrap();
    assert_eq!(reader.remaining(), 0, "version {version}");
    decoded
}

#[test]
fn version_178_has_no_bartender_fields() {
    let decoded = round_trip(&WorldHeader::with_defaults(178), 178);
    assert!(decoded.get("saved_bartender").is_none());
    assert!(decoded.get("downed_invasion_t1").is_none());
    assert!(decoded.get(names::SEED).is_none());
}

#[test]
fn version_179_stores_an_integer_seed() {
    let mut header = WorldHeader::with_defaults(179);
    header.set(names::SEED, 123_456);
    let decoded = round_trip(&header, 179);
    assert_eq!(decoded.get(names::SEED), Some(&FieldValue::I32(123_456)));
    assert!(decoded.get("saved_bartender").is_some());
}

#[test]
fn version_180_stores_a_string_seed() {
    let mut header = WorldHeader::with_defaults(180);
    header.set(names::SEED, "05162020");
    let decoded = round_trip(&header, 180);
    assert_eq!(decoded.str(names::SEED), Some("05162020"));
}

#[test]
fn wrong_seed_type_is_rejected() {
    let mut header = WorldHeader::with_defaults(180);
    header.set(names::SEED, 7);
    let mut writer = ByteWriter::new();
    assert_eq!(
        encode_header(&header, &mut writer, 180),
        Err(CodecError::FieldTypeMismatch {
            name: names::SEED,
            expected: "string",
            found: "i32",
        })
    );
}

#[test]
fn missing_field_is_rejected() {
    let mut writer = ByteWriter::new();
    assert_eq!(
        encode_header(&WorldHeader::new(), &mut writer, 194),
        Err(CodecError::MissingField {
            name: names::MAP_NAME
        })
    );
}

#[test]
fn short_creation_time_is_rejected() {
    let mut header = WorldHeader::with_defaults(279);
    header.set(names::CREATION_TIME, FieldValue::Bytes(vec![1, 2, 3]));
    let mut writer = ByteWriter::new();
    assert_eq!(
        encode_header(&header, &mut writer, 279),
        Err(CodecError::FieldLength {
            name: names::CREATION_TIME,
            expected: 8,
            actual: 3,
        })
    );
}

#[test]
fn moon_type_is_clamped_on_encode() {
    let mut header = WorldHeader::with_defaults(225);
    header.set(names::MOON_TYPE, FieldValue::U8(7));
    let decoded = round_trip(&header, 225);
    assert_eq!(decoded.get(names::MOON_TYPE), Some(&FieldValue::U8(0)));

    let decoded = round_trip(&header, 226);
    assert_eq!(decoded.get(names::MOON_TYPE), Some(&FieldValue::U8(7)));
}

proptest! {
    #[test]
    fn defaults_round_trip_at_every_version(version in 100i32..=300) {
        let header = WorldHeader::with_defaults(version);
        prop_assert_eq!(round_trip(&header, version), header);
    }

    #[test]
    fn named_values_survive(
        version in 194i32..=279,
        name in "[a-zA-Z ]{0,40}",
        id in any::<i32>(),
        width in 1i32..9000,
        hard_mode in any::<bool>(),
    ) {
        let mut header = WorldHeader::with_defaults(version);
        header.set(names::MAP_NAME, name.clone());
        header.set(names::WORLD_ID, id);
        header.set(names::MAX_TILES_X, width);
        header.set(names::HARD_MODE, hard_mode);
        let decoded = round_trip(&header, version);
        prop_assert_eq!(decoded.map_name(), Some(name.as_str()));
        prop_assert_eq!(decoded.world_id(), Some(id));
        prop_assert_eq!(decoded.i32(names::MAX_TILES_X), Some(width));
        prop_assert_eq!(decoded.bool(names::HARD_MODE), Some(hard_mode));
    }
}
