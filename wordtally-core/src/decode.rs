//! Zero-allocation UTF-8 decode step
//!
//! Characters are decoded one at a time from a borrowed byte slice, using the
//! width announced by the leading byte. Malformed input never fails: the
//! decoded character is simply absent and callers classify it as
//! [`CategoryTag::Other`](crate::CategoryTag::Other).

/// A single decoded character and the number of bytes it occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The character, or `None` for a malformed or truncated sequence
    pub ch: Option<char>,
    /// Bytes consumed, always at least 1
    pub len: usize,
}

/// Width in bytes announced by a leading byte
///
/// Stray continuation bytes (`0x80..=0xBF`) count as width 1 so a scan that
/// starts mid-character resynchronises on the next leading byte.
pub const fn lead_width(byte: u8) -> usize {
    match byte {
        0x00..=0xBF => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xFF => 4,
    }
}

/// Decode the character starting at `bytes[0]`
///
/// Returns `None` only for an empty slice. A sequence cut short by the end
/// of the slice consumes the remaining bytes and decodes to no character.
pub fn decode(bytes: &[u8]) -> Option<Decoded> {
    let &lead = bytes.first()?;
    if lead.is_ascii() {
        return Some(Decoded {
            ch: Some(lead as char),
            len: 1,
        });
    }

    let len = lead_width(lead).min(bytes.len());
    let ch = std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next());

    Some(Decoded { ch, len })
}

/// Iterator over the characters of a byte span, yielding `(offset, Decoded)`
#[derive(Debug, Clone)]
pub struct Utf8Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Utf8Scanner<'a> {
    /// Create a scanner over `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for Utf8Scanner<'_> {
    type Item = (usize, Decoded);

    fn next(&mut self) -> Option<Self::Item> {
        let decoded = decode(&self.bytes[self.pos..])?;
        let offset = self.pos;
        self.pos += decoded.len;
        Some((offset, decoded))
    }
}
