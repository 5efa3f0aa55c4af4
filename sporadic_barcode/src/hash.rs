pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME: u32 = 16_777_619;

/// FNV-1a over the UTF-16 code units of `s`.
///
/// Hashing code units instead of UTF-8 bytes keeps non-ASCII seeds mapped to
/// the same patterns the web rendering produces.
pub fn fnv1a32(s: &str) -> u32 {
    let mut h = FNV_OFFSET_BASIS;
    for unit in s.encode_utf16() {
        h ^= unit as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}
