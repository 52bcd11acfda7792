use crate::errors::ParseError;
use crate::parsing_utils::{decode_str, le_bool, STRING_EMPTY, STRING_PRESENT};

#[derive(Debug, Clone, PartialEq)]
pub struct CoreParser<'a> {
    data: &'a [u8],

    /// Current offset in regards to the whole view of the replay
    col: i32,
}

impl<'a> CoreParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CoreParser { data, col: 0 }
    }

    pub fn bytes_read(&self) -> i32 {
        self.col
    }

    /// Number of bytes that have yet to be consumed
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Used for skipping some amount of data
    fn advance(&mut self, ind: usize) {
        self.col += ind as i32;
        self.data = &self.data[ind..];
    }

    /// Returns a slice of the replay after ensuring there is enough space for the requested slice
    pub fn view_data(&self, size: usize) -> Result<&'a [u8], ParseError> {
        if size > self.data.len() {
            Err(ParseError::InsufficientData(
                i32::try_from(size).unwrap_or(i32::MAX),
                self.data.len() as i32,
            ))
        } else {
            Ok(&self.data[..size])
        }
    }

    pub fn take_data(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        let res = self.view_data(size)?;
        self.advance(size);
        Ok(res)
    }

    /// Take the next `N` bytes as a fixed size array
    #[inline]
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut res = [0u8; N];
        res.copy_from_slice(self.take_data(N)?);
        Ok(res)
    }

    pub fn take_i8(&mut self) -> Result<i8, ParseError> {
        self.take::<1>().map(i8::from_le_bytes)
    }

    pub fn take_bool(&mut self) -> Result<bool, ParseError> {
        self.take::<1>().map(le_bool)
    }

    pub fn take_i16(&mut self) -> Result<i16, ParseError> {
        self.take::<2>().map(i16::from_le_bytes)
    }

    pub fn take_u16(&mut self) -> Result<u16, ParseError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    pub fn take_i32(&mut self) -> Result<i32, ParseError> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    pub fn take_u32(&mut self) -> Result<u32, ParseError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    pub fn take_i64(&mut self) -> Result<i64, ParseError> {
        self.take::<8>().map(i64::from_le_bytes)
    }

    pub fn take_f64(&mut self) -> Result<f64, ParseError> {
        self.take::<8>().map(f64::from_le_bytes)
    }

    /// Decodes an unsigned LEB128 integer. Values that need more than 64 bits are rejected
    /// instead of silently wrapping.
    pub fn parse_uleb128(&mut self) -> Result<u64, ParseError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let [byte] = self.take::<1>()?;
            let low = u64::from(byte & 0x7f);
            if shift >= 64 || (shift == 63 && low > 1) {
                return Err(ParseError::LengthOverflow);
            }

            result |= low << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }

            shift += 7;
        }
    }

    /// Parses a string that is prefixed by a marker byte. A marker of zero is the empty string,
    /// while 0x0b is followed by the ULEB128 byte length and the UTF-8 contents.
    pub fn parse_str(&mut self) -> Result<&'a str, ParseError> {
        let [marker] = self.take::<1>()?;
        match marker {
            STRING_EMPTY => Ok(""),
            STRING_PRESENT => {
                let size = self.parse_uleb128()?;
                let size = usize::try_from(size).map_err(|_| ParseError::LengthOverflow)?;
                self.take_data(size).and_then(decode_str)
            }
            x => Err(ParseError::InvalidStringMarker(x)),
        }
    }

    pub fn parse_text(&mut self) -> Result<String, ParseError> {
        self.parse_str().map(String::from)
    }

    /// Parses a byte array prefixed by its signed 32bit length
    pub fn parse_byte_array(&mut self) -> Result<&'a [u8], ParseError> {
        let size = self.take_i32()?;
        if size < 0 {
            return Err(ParseError::NegativeLength(size));
        }

        self.take_data(size as usize)
    }
}
