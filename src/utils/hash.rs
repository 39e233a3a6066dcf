use crate::constants::{FNV_OFFSET_BASIS, FNV_PRIME};

/// FNV-1a over the bytes of `s` plus a trailing NUL.
///
/// Query cache keys are 32-bit FNV-1a hashes of the raw query text. The
/// terminating zero byte is folded in so the digest matches the historical
/// on-wire value for C strings of the same content.
#[inline]
pub fn fnv1a_32(s: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in s.as_bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    // trailing NUL
    hash = hash.wrapping_mul(FNV_PRIME);
    hash
}
