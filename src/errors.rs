use std::error::Error;
use std::fmt;
use std::io;
use std::str;

/// An error reported by a [`Compression`](crate::compression::Compression) filter. The filter's
/// own error is reduced to its message so that it can be compared and cloned.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CompressionError(pub String);

impl Error for CompressionError {}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fields of a single frame in the decompressed replay data
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum FrameField {
    Time,
    X,
    Y,
    Keys,
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameField::Time => f.write_str("time"),
            FrameField::X => f.write_str("x"),
            FrameField::Y => f.write_str("y"),
            FrameField::Keys => f.write_str("keys"),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum FrameError {
    Decompression(CompressionError),
    Compression(CompressionError),
    Utf8Error(str::Utf8Error),
    InvalidField {
        index: usize,
        field: FrameField,
        value: String,
    },
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FrameError::Decompression(e) | FrameError::Compression(e) => Some(e),
            FrameError::Utf8Error(e) => Some(e),
            FrameError::InvalidField { .. } => None,
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Decompression(_) => write!(f, "Unable to decompress replay data"),
            FrameError::Compression(_) => write!(f, "Unable to compress replay data"),
            FrameError::Utf8Error(_) => write!(f, "Decompressed replay data is not valid utf8"),
            FrameError::InvalidField {
                index,
                field,
                value,
            } => write!(
                f,
                "Frame {} has an invalid {} field: {:?}",
                index, field, value
            ),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum ParseError {
    InsufficientData(i32, i32),
    InvalidStringMarker(u8),
    Utf8Error(str::Utf8Error),
    LengthOverflow,
    NegativeLength(i32),
    TimestampRange(i64),
    ParseError(&'static str, i32, Box<ParseError>),
    FrameError(Box<FrameError>),
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Utf8Error(e) => Some(e),
            ParseError::ParseError(_, _, e) => Some(e),
            ParseError::FrameError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<str::Utf8Error> for ParseError {
    fn from(error: str::Utf8Error) -> Self {
        ParseError::Utf8Error(error)
    }
}

impl From<FrameError> for ParseError {
    fn from(error: FrameError) -> Self {
        ParseError::FrameError(Box::new(error))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InsufficientData(expected, left) => write!(
                f,
                "Insufficient data. Expected {} bytes, but only {} left",
                expected, left
            ),
            ParseError::InvalidStringMarker(marker) => {
                write!(f, "Invalid string marker: 0x{:02x}", marker)
            }
            ParseError::Utf8Error(e) => write!(f, "Unable decode data as utf8: {}", e),
            ParseError::LengthOverflow => write!(f, "String length does not fit in 64 bits"),
            ParseError::NegativeLength(size) => write!(f, "Byte array of size {} is negative", size),
            ParseError::TimestampRange(ticks) => {
                write!(f, "Timestamp of {} ticks is out of range", ticks)
            }
            ParseError::ParseError(section, offset, e) => write!(
                f,
                "Could not decode replay {} at offset ({}): {}",
                section, offset, e
            ),
            ParseError::FrameError(e) => write!(f, "Replay data error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum EncodeError {
    Io(io::Error),
    DataTooLarge(usize),
    TimestampRange(i64),
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EncodeError {
    fn from(error: io::Error) -> Self {
        EncodeError::Io(error)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Io(e) => write!(f, "Unable to write replay: {}", e),
            EncodeError::DataTooLarge(size) => {
                write!(f, "Replay data of {} bytes is too large", size)
            }
            EncodeError::TimestampRange(secs) => write!(
                f,
                "Timestamp of {} seconds can't be represented in ticks",
                secs
            ),
        }
    }
}
