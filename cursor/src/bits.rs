//! BitsByte packing: boolean groups stored least-significant-bit first.

/// Returns the number of bytes needed to store `size` flags.
#[must_use]
pub const fn packed_len(size: usize) -> usize {
    size.div_ceil(8)
}

/// Packs flags into bytes. Flag `i` lands in byte `i / 8` at bit `i % 8`.
#[must_use]
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; packed_len(bits.len())];
    for (index, _) in bits.iter().enumerate().filter(|(_, set)| **set) {
        bytes[index / 8] |= 1 << (index % 8);
    }
    bytes
}

/// Unpacks `size` flags from `bytes`.
///
/// Flags past the end of `bytes` read as `false`.
#[must_use]
pub fn unpack_bits(bytes: &[u8], size: usize) -> Vec<bool> {
    (0..size)
        .map(|index| {
            bytes
                .get(index / 8)
                .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
        })
        .collect()
}
