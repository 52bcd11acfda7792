//! # Frames
//!
//! The cursor movement and key presses of a replay are stored as an LZMA compressed blob. Once
//! decompressed, the blob is ASCII text: frames are separated by commas and each frame is four
//! pipe delimited fields.
//!
//! ```plain
//! time|x|y|keys,time|x|y|keys,...
//! ```
//!
//! - `time`: integer milliseconds
//! - `x` and `y`: cursor position as floating point
//! - `keys`: integer bit field of the keys held down (see [`Keys`](crate::Keys))
//!
//! Clients are known to append degenerate tokens (such as a trailing comma), so any token without
//! four fields is skipped instead of failing the whole decode. A malformed number in a well formed
//! token is an error.
//!
//! Encoding and decoding are split into the text layer ([`parse_frames`] and [`format_frames`])
//! and the compression layer, so a different [`Compression`] filter can be slotted in with
//! [`decode_frames_with`] and [`encode_frames_with`].

use crate::compression::{Compression, Lzma};
use crate::errors::{FrameError, FrameField};
use crate::models::{Frame, Keys};
use std::str::FromStr;
use tracing::{debug, trace};

/// Decompresses the replay data with LZMA and decodes the frames
pub fn decode_frames(data: &[u8]) -> Result<Vec<Frame>, FrameError> {
    decode_frames_with(&Lzma, data)
}

/// Decompresses the replay data with the given filter and decodes the frames
pub fn decode_frames_with<C>(compression: &C, data: &[u8]) -> Result<Vec<Frame>, FrameError>
where
    C: Compression + ?Sized,
{
    let raw = compression
        .decompress(data)
        .map_err(FrameError::Decompression)?;
    let text = std::str::from_utf8(&raw).map_err(FrameError::Utf8Error)?;
    let frames = parse_frames(text)?;
    debug!(
        compressed = data.len(),
        decompressed = raw.len(),
        frames = frames.len(),
        "decoded replay frames"
    );
    Ok(frames)
}

/// Encodes the frames and compresses them with LZMA
pub fn encode_frames(frames: &[Frame]) -> Result<Vec<u8>, FrameError> {
    encode_frames_with(&Lzma, frames)
}

/// Encodes the frames and compresses them with the given filter
pub fn encode_frames_with<C>(compression: &C, frames: &[Frame]) -> Result<Vec<u8>, FrameError>
where
    C: Compression + ?Sized,
{
    let text = format_frames(frames);
    compression
        .compress(text.as_bytes())
        .map_err(FrameError::Compression)
}

/// Decodes the decompressed text of the replay data. Frames are returned in the order they appear.
pub fn parse_frames(text: &str) -> Result<Vec<Frame>, FrameError> {
    let mut frames = Vec::new();
    for (index, token) in text.split(',').enumerate() {
        let mut fields = token.split('|');
        let (time, x, y, keys) = match (fields.next(), fields.next(), fields.next(), fields.next())
        {
            (Some(time), Some(x), Some(y), Some(keys)) => (time, x, y, keys),
            _ => {
                trace!(index, token, "skipping frame with fewer than four fields");
                continue;
            }
        };

        frames.push(Frame {
            time: parse_field(index, FrameField::Time, time)?,
            x: parse_field(index, FrameField::X, x)?,
            y: parse_field(index, FrameField::Y, y)?,
            keys: Keys::from_bits(parse_field(index, FrameField::Keys, keys)?),
        });
    }

    Ok(frames)
}

fn parse_field<T: FromStr>(index: usize, field: FrameField, value: &str) -> Result<T, FrameError> {
    value.parse::<T>().map_err(|_| FrameError::InvalidField {
        index,
        field,
        value: String::from(value),
    })
}

/// Encodes frames into the text that is compressed into the replay data. There is no trailing
/// comma.
pub fn format_frames(frames: &[Frame]) -> String {
    let mut out = String::with_capacity(frames.len() * 16);
    for (i, frame) in frames.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }

        out.push_str(&frame.time.to_string());
        out.push('|');
        out.push_str(&format_float(frame.x));
        out.push('|');
        out.push_str(&format_float(frame.y));
        out.push('|');
        out.push_str(&frame.keys.bits().to_string());
    }
    out
}

/// Formats a float in the compact style of `%g` with the shortest digits that round trip: plain
/// notation for decimal exponents within [-4, 6) and scientific notation with at least two
/// exponent digits otherwise (`1e+06`, `1.5e-05`).
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return String::from("NaN");
    } else if value.is_infinite() {
        return String::from(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else if value == 0.0 {
        return String::from(if value.is_sign_negative() { "-0" } else { "0" });
    }

    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if (-4..6).contains(&exp) {
        format!("{}", value)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}
