use crate::errors::EncodeError;
use crate::parsing_utils::{encode_uleb128, STRING_EMPTY, STRING_PRESENT};
use std::io::Write;

/// The mirror image of the `CoreParser`: writes little endian primitives to the underlying writer
#[derive(Debug)]
pub struct CoreWriter<W> {
    inner: W,
}

impl<W: Write> CoreWriter<W> {
    pub fn new(inner: W) -> Self {
        CoreWriter { inner }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }

    #[inline]
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.inner.write_all(data)?;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<(), EncodeError> {
        self.write_data(&[u8::from(v)])
    }

    pub fn write_i16(&mut self, v: i16) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<(), EncodeError> {
        self.write_data(&v.to_le_bytes())
    }

    /// Writes the marker byte, and for non-empty strings, the ULEB128 length and contents
    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        if s.is_empty() {
            return self.write_data(&[STRING_EMPTY]);
        }

        let mut prefix = Vec::with_capacity(11);
        prefix.push(STRING_PRESENT);
        encode_uleb128(s.len() as u64, &mut prefix);
        self.write_data(&prefix)?;
        self.write_data(s.as_bytes())
    }

    /// Writes the data prefixed by its length as a signed 32bit integer
    pub fn write_byte_array(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let size = i32::try_from(data.len()).map_err(|_| EncodeError::DataTooLarge(data.len()))?;
        self.write_i32(size)?;
        self.write_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_parser::CoreParser;

    fn written<F>(f: F) -> Vec<u8>
    where
        F: FnOnce(&mut CoreWriter<Vec<u8>>) -> Result<(), EncodeError>,
    {
        let mut writer = CoreWriter::new(Vec::new());
        f(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn write_empty_string() {
        assert_eq!(written(|w| w.write_str("")), vec![0x00]);
    }

    #[test]
    fn write_present_string() {
        assert_eq!(
            written(|w| w.write_str("abc")),
            vec![0x0b, 0x03, b'a', b'b', b'c']
        );
    }

    #[test]
    fn string_round_trip() {
        let long = "x".repeat(1000);
        let cases = ["", "a", "cookiezi", "ñoño", "クッキー☆", "🎵 rhythm 🎵", long.as_str()];
        for case in cases.iter() {
            let data = written(|w| w.write_str(case));
            let mut parser = CoreParser::new(&data[..]);
            assert_eq!(parser.parse_str().unwrap(), *case);
            assert!(parser.is_empty());
        }
    }

    #[test]
    fn write_numbers_little_endian() {
        let data = written(|w| {
            w.write_i8(-1)?;
            w.write_bool(true)?;
            w.write_u16(0x1234)?;
            w.write_i32(-2)?;
            w.write_i64(1)
        });
        assert_eq!(
            data,
            vec![
                0xff, 0x01, 0x34, 0x12, 0xfe, 0xff, 0xff, 0xff, 0x01, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn write_byte_array() {
        assert_eq!(
            written(|w| w.write_byte_array(&[0xaa, 0xbb])),
            vec![0x02, 0x00, 0x00, 0x00, 0xaa, 0xbb]
        );
        assert_eq!(written(|w| w.write_byte_array(&[])), vec![0, 0, 0, 0]);
    }
}
