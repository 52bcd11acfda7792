//! # Parsing
//!
//! An osu! replay is a little endian binary encoded file. The number 100 would be represented as
//! the four byte sequence:
//!
//! ```plain
//! 0x64 0x00 0x00 0x00
//! ```
//!
//! Unlike other replay formats, there are no sections or length prefixed headers. The fields are
//! laid out one after another:
//!
//! | Type | Field |
//! |---|---|
//! | byte | game mode |
//! | int | game version |
//! | string | beatmap MD5 hash |
//! | string | player name |
//! | string | replay MD5 hash |
//! | short | number of 300s |
//! | short | number of 100s |
//! | short | number of 50s |
//! | short | number of gekis |
//! | short | number of katus |
//! | short | number of misses |
//! | int | total score |
//! | short | max combo |
//! | byte | perfect combo |
//! | int | mods |
//! | string | life bar graph |
//! | long | timestamp in ticks |
//! | int + bytes | compressed replay data |
//! | long | online score id |
//! | double | additional mod info (optional) |
//!
//! Strings start with a marker byte. A zero marker is an empty string, while 0x0b is followed by
//! the ULEB128 encoded byte length and the UTF-8 contents.
//!
//! The additional mod info is not prefixed with any tag. It's considered present if there is any
//! data after the online score id, so if a field is ever added after it, this detection will break.
//!
//! The replay data is LZMA compressed text describing the cursor and keys at every frame. It is not
//! decoded unless requested, see [`FrameParse`].

use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::frames;
use crate::models::*;
use crate::mods::Mods;
use crate::ticks::time_from_ticks;
use tracing::{debug, warn};

/// Determines how the parser should handle the compressed replay data, which is the most
/// intensive and volatile section of the replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameParse {
    /// If the replay data fails to decode return an error
    Always,

    /// Leave the replay data compressed. This is the default.
    Never,

    /// Attempt to decode the replay data, but if unsuccessful ignore the error and continue
    IgnoreOnError,
}

/// The main entry point to parsing replays in osrkit. Allows one to customize parsing options,
/// such as whether the frames should be decoded.
///
/// ```
/// let data = [0u8; 4];
/// let err = osrkit::ParserBuilder::new(&data[..]).parse().unwrap_err();
/// assert!(err.to_string().starts_with("Could not decode replay"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParserBuilder<'a> {
    data: &'a [u8],
    frame_parse: Option<FrameParse>,
}

impl<'a> ParserBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ParserBuilder {
            data,
            frame_parse: None,
        }
    }

    pub fn must_parse_frames(mut self) -> ParserBuilder<'a> {
        self.frame_parse = Some(FrameParse::Always);
        self
    }

    pub fn never_parse_frames(mut self) -> ParserBuilder<'a> {
        self.frame_parse = Some(FrameParse::Never);
        self
    }

    pub fn ignore_frames_on_error(mut self) -> ParserBuilder<'a> {
        self.frame_parse = Some(FrameParse::IgnoreOnError);
        self
    }

    pub fn with_frame_parse(mut self, parse: FrameParse) -> ParserBuilder<'a> {
        self.frame_parse = Some(parse);
        self
    }

    pub fn parse(self) -> Result<Replay, ParseError> {
        let mut parser = Parser::new(self.data, self.frame_parse.unwrap_or(FrameParse::Never));
        parser.parse()
    }
}

/// Holds the current state of parsing a replay
#[derive(Debug, Clone, PartialEq)]
pub struct Parser<'a> {
    core: CoreParser<'a>,
    frame_parse: FrameParse,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8], frame_parse: FrameParse) -> Self {
        Parser {
            core: CoreParser::new(data),
            frame_parse,
        }
    }

    /// Runs the given parse function and annotates any error with the field and the offset at
    /// which it occurred
    fn field<T, F>(&mut self, section: &'static str, mut f: F) -> Result<T, ParseError>
    where
        F: FnMut(&mut CoreParser<'a>) -> Result<T, ParseError>,
    {
        let offset = self.core.bytes_read();
        f(&mut self.core).map_err(|e| ParseError::ParseError(section, offset, Box::new(e)))
    }

    fn parse(&mut self) -> Result<Replay, ParseError> {
        let mode = self.field("game mode", CoreParser::take_i8)?;
        let version = self.field("version", CoreParser::take_i32)?;
        let beatmap_hash = self.field("beatmap hash", CoreParser::parse_text)?;
        let player_name = self.field("player name", CoreParser::parse_text)?;
        let replay_hash = self.field("replay hash", CoreParser::parse_text)?;
        let count_300 = self.field("300 count", CoreParser::take_u16)?;
        let count_100 = self.field("100 count", CoreParser::take_u16)?;
        let count_50 = self.field("50 count", CoreParser::take_u16)?;
        let count_geki = self.field("geki count", CoreParser::take_u16)?;
        let count_katu = self.field("katu count", CoreParser::take_u16)?;
        let count_miss = self.field("miss count", CoreParser::take_u16)?;
        let score = self.field("score", CoreParser::take_i32)?;
        let max_combo = self.field("max combo", CoreParser::take_i16)?;
        let perfect = self.field("perfect combo", CoreParser::take_bool)?;
        let mods = self.field("mods", CoreParser::take_u32)?;
        let life_bar = self.field("life bar", CoreParser::parse_text)?;
        let timestamp = self.field("timestamp", |core| {
            let ticks = core.take_i64()?;
            time_from_ticks(ticks).ok_or(ParseError::TimestampRange(ticks))
        })?;
        let replay_data = self.field("replay data", |core| {
            core.parse_byte_array().map(|x| x.to_vec())
        })?;
        let online_id = self.field("online id", CoreParser::take_i64)?;
        let additional_mods = self.parse_additional_mods()?;

        let frames = match self.frame_parse {
            FrameParse::Always => Some(frames::decode_frames(&replay_data)?),
            FrameParse::IgnoreOnError => match frames::decode_frames(&replay_data) {
                Ok(x) => Some(x),
                Err(e) => {
                    warn!(error = %e, "ignoring replay data that failed to decode");
                    None
                }
            },
            FrameParse::Never => None,
        };

        Ok(Replay {
            mode: GameMode::from(mode),
            version,
            beatmap_hash,
            player_name,
            replay_hash,
            count_300,
            count_100,
            count_50,
            count_geki,
            count_katu,
            count_miss,
            score,
            max_combo,
            perfect,
            mods: Mods(mods),
            life_bar,
            timestamp,
            replay_data,
            online_id,
            additional_mods,
            frames,
        })
    }

    /// The additional mods are only present if there is data left over
    fn parse_additional_mods(&mut self) -> Result<Option<f64>, ParseError> {
        if self.core.is_empty() {
            return Ok(None);
        }

        let value = self.field("additional mods", CoreParser::take_f64)?;
        if !self.core.is_empty() {
            debug!(
                remaining = self.core.remaining(),
                "ignoring trailing data after additional mods"
            );
        }

        Ok(Some(value))
    }
}
