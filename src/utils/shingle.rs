use crate::index::types::Shingle;

/// Number of characters in a shingle.
pub const SHINGLE_LENGTH: usize = 3;

/// Bits reserved per character when packing a shingle (covers all of `char`).
const CHAR_BITS: u32 = 21;

/// Pack three characters into a [`Shingle`].
#[inline]
pub fn chars_to_shingle(a: char, b: char, c: char) -> Shingle {
    ((a as u64) << (CHAR_BITS * 2)) | ((b as u64) << CHAR_BITS) | c as u64
}

/// Unpack a [`Shingle`] back into its text form.
pub fn shingle_to_string(shingle: Shingle) -> String {
    let mask = (1u64 << CHAR_BITS) - 1;
    [
        (shingle >> (CHAR_BITS * 2)) & mask,
        (shingle >> CHAR_BITS) & mask,
        shingle & mask,
    ]
    .into_iter()
    .filter_map(|code| char::from_u32(code as u32))
    .collect()
}

/// Extract the unique overlapping 3-character shingles of a token, sorted.
///
/// Works on characters rather than bytes so accented names shingle the
/// same way as ASCII ones. Tokens shorter than three characters have none.
pub fn extract_shingles(token: &str) -> Vec<Shingle> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < SHINGLE_LENGTH {
        return Vec::new();
    }

    let mut shingles: Vec<Shingle> = chars
        .windows(SHINGLE_LENGTH)
        .map(|w| chars_to_shingle(w[0], w[1], w[2]))
        .collect();
    shingles.sort_unstable();
    shingles.dedup();
    shingles
}
