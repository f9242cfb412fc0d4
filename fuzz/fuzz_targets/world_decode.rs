#![no_main]

use codec::{decode_world_with, encode_world, CodecLimits, DecodeOptions};
use format::Limits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = DecodeOptions::new()
        .limits(CodecLimits::for_testing())
        .format_limits(Limits::for_testing());
    if let Ok(world) = decode_world_with(data, options) {
        // Anything that decodes must encode again.
        let _ = encode_world(&world);
    }

    let lenient = DecodeOptions::new()
        .ignore_pointers(true)
        .limits(CodecLimits::for_testing())
        .format_limits(Limits::for_testing());
    let _ = decode_world_with(data, lenient);
});
