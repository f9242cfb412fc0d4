#![no_main]

use cursor::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Input bytes pick a bounded sequence of reads.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 8;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_i16();
            }
            2 => {
                let _ = reader.read_i32();
            }
            3 => {
                let _ = reader.read_f64();
            }
            4 => {
                let _ = reader.read_string();
            }
            5 => {
                let size = usize::from(data[idx.saturating_sub(1)] % 64);
                let _ = reader.read_bits_byte(size);
            }
            6 => {
                let offset = usize::from(data[idx.saturating_sub(1)]);
                let _ = reader.jump(offset);
            }
            _ => {
                let _ = reader.read_length_prefix();
            }
        }
    }
});
