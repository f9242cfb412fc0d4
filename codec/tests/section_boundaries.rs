use codec::{
    decode_world, decode_world_with, encode_world, CodecError, DecodeOptions, ErrorKind,
    SectionKind, SectionSet, Stage, Tile, TileGrid, Wall, World,
};
use format::FormatError;
use schema::names;

/// A 2x2 world whose tile section is `02 01 00 40 01`.
fn encoded_world() -> (Vec<u8>, usize) {
    let mut world = World::new(194, 2, 2);
    world.header.set(names::MAP_NAME, "Edge");
    let mut grid = TileGrid::new(2, 2);
    *grid.get_mut(0, 0).unwrap() = Tile::with_block(1);
    world.tiles = Some(grid);
    let bytes = encode_world(&world).unwrap();
    let decoded = decode_world(&bytes).unwrap();
    let tiles_start = usize::try_from(decoded.file_format_header.pointers[1]).unwrap();
    assert_eq!(&bytes[tiles_start..tiles_start + 5], &[0x02, 0x01, 0x00, 0x40, 0x01]);
    (bytes, tiles_start)
}

/// Turns the run-of-air flag of column 1 into a wall flag, so the last
/// tile is read from the first byte of the chest section.
fn overrun_tiles() -> Vec<u8> {
    let (mut bytes, tiles_start) = encoded_world();
    bytes[tiles_start + 3] = 0x04;
    bytes
}

#[test]
fn tile_overrun_is_a_boundary_mismatch() {
    let err = decode_world(&overrun_tiles()).unwrap_err();
    assert_eq!(err.stage, Stage::Parsing);
    assert_eq!(err.kind(), ErrorKind::SectionBoundaryMismatch);
    assert_eq!(err.section(), Some(SectionKind::Tiles));
    assert!(matches!(
        err.error,
        CodecError::Format(FormatError::SectionBoundary { .. })
    ));
}

#[test]
fn ignoring_pointers_resumes_at_the_next_section() {
    let bytes = overrun_tiles();
    let world = decode_world_with(&bytes, DecodeOptions::new().ignore_pointers(true)).unwrap();
    let grid = world.tiles.unwrap();
    assert_eq!(grid.get(1, 0).unwrap().wall, Some(Wall::new(1)));
    assert!(grid.get(1, 1).unwrap().is_air());
    assert_eq!(world.chests, Some(Vec::new()));
    assert!(world.footer.is_some());
}

#[test]
fn unselected_corrupt_section_is_never_read() {
    let bytes = overrun_tiles();
    let sections = SectionSet::all().without(SectionKind::Tiles);
    let world = decode_world_with(&bytes, DecodeOptions::new().sections(sections)).unwrap();
    assert!(world.tiles.is_none());
    assert!(world.signs.is_some());
}

#[test]
fn truncated_file_is_out_of_range() {
    let (bytes, tiles_start) = encoded_world();
    let err = decode_world(&bytes[..tiles_start + 2]).unwrap_err();
    assert_eq!(err.stage, Stage::Parsing);
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn pointer_past_buffer_end_is_out_of_range() {
    let (mut bytes, _) = encoded_world();
    // First pointer sits right after the 26-byte prefix.
    bytes[26..30].copy_from_slice(&u32::MAX.to_le_bytes());
    let err = decode_world(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::OutOfRange | ErrorKind::SectionBoundaryMismatch
    ));
}
