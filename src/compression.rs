use crate::errors::CompressionError;
use std::io::BufReader;

/// A byte stream filter that the replay data is tunneled through. The frames are encoded as text
/// before they are handed to the filter, so swapping the filter leaves the frame codec untouched.
pub trait Compression {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

/// The LZMA filter used by the game client: the legacy `.lzma` container with a 13 byte header
/// (properties, dictionary size, and unpacked size) followed by the raw LZMA1 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lzma;

impl Compression for Lzma {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::new();
        lzma_rs::lzma_compress(&mut BufReader::new(data), &mut out)
            .map_err(|e| CompressionError(e.to_string()))?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::new();
        lzma_rs::lzma_decompress(&mut BufReader::new(data), &mut out)
            .map_err(|e| CompressionError(e.to_string()))?;
        Ok(out)
    }
}
