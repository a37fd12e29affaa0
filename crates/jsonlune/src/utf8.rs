//! Hex-quad and UTF-8 helpers for `\uXXXX` escape decoding.

/// Value of each byte as a hex digit, `-1` for everything else.
#[allow(clippy::cast_possible_truncation)]
static HEX_NIBBLE: [i8; 256] = {
    let mut table = [-1_i8; 256];
    let mut digit = 0;
    while digit < 10 {
        table[b'0' as usize + digit] = digit as i8;
        digit += 1;
    }
    let mut digit = 0;
    while digit < 6 {
        table[b'a' as usize + digit] = 10 + digit as i8;
        table[b'A' as usize + digit] = 10 + digit as i8;
        digit += 1;
    }
    table
};

/// Reads four hex digits from the front of `bytes` as a code point.
///
/// Returns `None` when fewer than four bytes are available or any of them
/// is not a hex digit.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn hex4_to_codepoint(bytes: &[u8]) -> Option<u32> {
    let quad = bytes.first_chunk::<4>()?;
    let mut codepoint: u32 = 0;
    for &byte in quad {
        let nibble = HEX_NIBBLE[usize::from(byte)];
        if nibble < 0 {
            return None;
        }
        codepoint = (codepoint << 4) | u32::from(nibble as u8);
    }
    Some(codepoint)
}

/// UTF-8 bytes for a single code point, at most four.
pub(crate) struct Utf8Seq {
    bytes: [u8; 4],
    len: u8,
}

impl Utf8Seq {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

/// Encodes `codepoint` as UTF-8 without validating it.
///
/// Unpaired surrogates come out in their raw three-byte form rather than
/// being rejected or paired up. Values above `0x1F_FFFF` do not fit four
/// bytes and yield `None`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn codepoint_to_utf8(codepoint: u32) -> Option<Utf8Seq> {
    let mut bytes = [0u8; 4];
    let len = if codepoint <= 0x7F {
        bytes[0] = codepoint as u8;
        1
    } else if codepoint <= 0x7FF {
        bytes[0] = 0xC0 | (codepoint >> 6) as u8;
        bytes[1] = 0x80 | (codepoint & 0x3F) as u8;
        2
    } else if codepoint <= 0xFFFF {
        bytes[0] = 0xE0 | (codepoint >> 12) as u8;
        bytes[1] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
        bytes[2] = 0x80 | (codepoint & 0x3F) as u8;
        3
    } else if codepoint <= 0x001F_FFFF {
        bytes[0] = 0xF0 | (codepoint >> 18) as u8;
        bytes[1] = 0x80 | ((codepoint >> 12) & 0x3F) as u8;
        bytes[2] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
        bytes[3] = 0x80 | (codepoint & 0x3F) as u8;
        4
    } else {
        return None;
    };
    Some(Utf8Seq { bytes, len })
}
