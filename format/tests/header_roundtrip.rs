use cursor::{ByteReader, ByteWriter};
use format::{
    pointer_count, FileFormatHeader, FormatError, Limits, Magic, PointerTable, SectionKind,
};
use proptest::prelude::*;

fn magic_strategy() -> impl Strategy<Value = Magic> {
    prop_oneof![Just(Magic::Desktop), Just(Magic::Mobile)]
}

proptest! {
    #[test]
    fn prop_header_roundtrip(
        version in 194i32..300,
        magic in magic_strategy(),
        revision in any::<u32>(),
        favorite in any::<bool>(),
        importance in prop::collection::vec(any::<bool>(), 0..700),
    ) {
        let header = FileFormatHeader {
            magic,
            revision,
            favorite,
            ..FileFormatHeader::new(version, importance)
        };

        let mut writer = ByteWriter::new();
        let slot = header.encode(&mut writer).unwrap();
        let end = writer.position();
        let offsets = vec![end; slot.count()];
        slot.backpatch(&mut writer, &offsets).unwrap();
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        let decoded = FileFormatHeader::decode(&mut reader, &Limits::default()).unwrap();
        prop_assert_eq!(&decoded, &header);
        prop_assert_eq!(decoded.pointers.len(), pointer_count(version));
        prop_assert_eq!(reader.position(), end);
    }

    #[test]
    fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut reader = ByteReader::new(&data);
        let _ = FileFormatHeader::decode(&mut reader, &Limits::for_testing());
    }
}

#[test]
fn every_section_of_the_layout_has_a_slot() {
    for version in [194, 224, 225, 279] {
        let header = FileFormatHeader::new(version, Vec::new());
        let mut writer = ByteWriter::new();
        let slot = header.encode(&mut writer).unwrap();
        let offsets: Vec<usize> = (0..slot.count()).map(|i| 100 + i).collect();
        slot.backpatch(&mut writer, &offsets).unwrap();
        let bytes = writer.finish();

        let decoded =
            FileFormatHeader::decode(&mut ByteReader::new(&bytes), &Limits::default()).unwrap();
        let table = PointerTable::new(&decoded.pointers);
        for (index, kind) in SectionKind::layout(version).iter().enumerate() {
            assert!(
                table.require_start(*kind, index).is_ok(),
                "{kind} has no pointer at version {version}"
            );
        }
    }
}

#[test]
fn encode_rejects_unsupported_version() {
    let header = FileFormatHeader::new(150, Vec::new());
    let mut writer = ByteWriter::new();
    assert_eq!(
        header.encode(&mut writer),
        Err(FormatError::UnsupportedVersion {
            found: 150,
            minimum: 194
        })
    );
}
