use crate::errors::ParseError;

/// Marker byte that precedes an absent (empty) string
pub const STRING_EMPTY: u8 = 0x00;

/// Marker byte that precedes a ULEB128 length prefixed string
pub const STRING_PRESENT: u8 = 0x0b;

/// Interprets the data as a UTF-8 string. Unlike the other fields in a replay, strings are not
/// null terminated, so the slice is taken as is.
pub fn decode_str(input: &[u8]) -> Result<&str, ParseError> {
    Ok(::std::str::from_utf8(input)?)
}

/// Any non-zero byte is considered true
#[inline]
pub fn le_bool(d: [u8; 1]) -> bool {
    d[0] != 0
}

/// Appends the unsigned LEB128 encoding of `value`: seven bits per byte, least significant group
/// first, with the high bit set on every byte but the last.
pub fn encode_uleb128(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }

        out.push(byte | 0x80);
    }
}
