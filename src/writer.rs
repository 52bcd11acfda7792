//! # Writing
//!
//! Encodes a replay back into the binary format, field by field in the same order that they are
//! parsed. A replay that is parsed and written back out is byte for byte identical, except that an
//! additional mods value of exactly zero is omitted.

use crate::core_writer::CoreWriter;
use crate::errors::EncodeError;
use crate::models::Replay;
use crate::ticks::ticks_from_time;
use std::io::Write;

/// Writes the replay to the given writer. The compressed `replay_data` is written as is: decoded
/// `frames` are not consulted, so they must be re-encoded by the caller with
/// [`encode_frames`](crate::frames::encode_frames) if they were modified.
pub fn write_replay<W: Write>(writer: W, replay: &Replay) -> Result<(), EncodeError> {
    let mut w = CoreWriter::new(writer);
    w.write_i8(replay.mode.raw())?;
    w.write_i32(replay.version)?;
    w.write_str(&replay.beatmap_hash)?;
    w.write_str(&replay.player_name)?;
    w.write_str(&replay.replay_hash)?;
    w.write_u16(replay.count_300)?;
    w.write_u16(replay.count_100)?;
    w.write_u16(replay.count_50)?;
    w.write_u16(replay.count_geki)?;
    w.write_u16(replay.count_katu)?;
    w.write_u16(replay.count_miss)?;
    w.write_i32(replay.score)?;
    w.write_i16(replay.max_combo)?;
    w.write_bool(replay.perfect)?;
    w.write_u32(replay.mods.bits())?;
    w.write_str(&replay.life_bar)?;

    let ticks = ticks_from_time(&replay.timestamp)
        .ok_or_else(|| EncodeError::TimestampRange(replay.timestamp.timestamp()))?;
    w.write_i64(ticks)?;
    w.write_byte_array(&replay.replay_data)?;
    w.write_i64(replay.online_id)?;

    match replay.additional_mods {
        Some(x) if x != 0.0 => w.write_f64(x),
        _ => Ok(()),
    }
}

impl Replay {
    /// Encodes the replay into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.replay_data.len() + 256);
        write_replay(&mut out, self)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameMode;
    use crate::mods::Mods;
    use crate::parser::ParserBuilder;
    use chrono::{TimeZone, Utc};
    use std::io;

    fn sample() -> Replay {
        Replay {
            mode: GameMode::Taiko,
            version: 20210520,
            beatmap_hash: String::from("0123456789abcdef0123456789abcdef"),
            player_name: String::from("WhiteCat"),
            replay_hash: String::from("fedcba9876543210fedcba9876543210"),
            count_300: 1200,
            count_100: 12,
            count_50: 0,
            count_geki: 300,
            count_katu: 5,
            count_miss: 0,
            score: 123_456_789,
            max_combo: 1500,
            perfect: true,
            mods: Mods(24),
            life_bar: String::from("342|1,3000|1,"),
            timestamp: Utc.with_ymd_and_hms(2021, 5, 20, 12, 30, 45).unwrap(),
            replay_data: vec![0x5d, 0x00, 0x00, 0x20, 0x00],
            online_id: 3_700_000_000,
            additional_mods: None,
            frames: None,
        }
    }

    fn round_trip(replay: &Replay) -> Replay {
        let data = replay.to_bytes().unwrap();
        ParserBuilder::new(&data).parse().unwrap()
    }

    #[test]
    fn round_trip_without_additional_mods() {
        let replay = sample();
        assert_eq!(round_trip(&replay), replay);
    }

    #[test]
    fn round_trip_with_additional_mods() {
        let mut replay = sample();
        replay.additional_mods = Some(1.25);
        assert_eq!(round_trip(&replay), replay);
    }

    #[test]
    fn zero_additional_mods_is_dropped() {
        let mut replay = sample();
        replay.additional_mods = Some(0.0);
        let without = sample().to_bytes().unwrap();
        assert_eq!(replay.to_bytes().unwrap(), without);
        assert_eq!(round_trip(&replay).additional_mods, None);
    }

    #[test]
    fn round_trip_empty_strings_and_data() {
        let mut replay = sample();
        replay.beatmap_hash.clear();
        replay.player_name.clear();
        replay.replay_hash.clear();
        replay.life_bar.clear();
        replay.replay_data.clear();
        replay.mode = GameMode::Unknown(-7);
        assert_eq!(round_trip(&replay), replay);
    }

    #[test]
    fn writes_exact_layout() {
        let mut replay = sample();
        replay.beatmap_hash = String::from("a");
        replay.player_name.clear();
        replay.replay_hash.clear();
        replay.life_bar.clear();
        replay.replay_data = vec![0xee];
        replay.timestamp = Utc.timestamp_opt(0, 0).unwrap();
        replay.additional_mods = Some(-1.0);

        let mut expected = vec![0x01];
        expected.extend_from_slice(&20210520i32.to_le_bytes());
        expected.extend_from_slice(&[0x0b, 0x01, b'a', 0x00, 0x00]);
        for count in [1200u16, 12, 0, 300, 5, 0].iter() {
            expected.extend_from_slice(&count.to_le_bytes());
        }
        expected.extend_from_slice(&123_456_789i32.to_le_bytes());
        expected.extend_from_slice(&1500i16.to_le_bytes());
        expected.push(0x01);
        expected.extend_from_slice(&24u32.to_le_bytes());
        expected.push(0x00);
        expected.extend_from_slice(&621_355_968_000_000_000i64.to_le_bytes());
        expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0xee]);
        expected.extend_from_slice(&3_700_000_000i64.to_le_bytes());
        expected.extend_from_slice(&(-1.0f64).to_le_bytes());

        assert_eq!(replay.to_bytes().unwrap(), expected);
    }

    #[test]
    fn sub_second_timestamp_is_truncated() {
        let mut replay = sample();
        replay.timestamp = Utc.timestamp_opt(1_600_000_000, 500_000_000).unwrap();
        let decoded = round_trip(&replay);
        assert_eq!(decoded.timestamp.timestamp(), 1_600_000_000);
        assert_eq!(decoded.timestamp.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn frames_are_not_written() {
        let mut replay = sample();
        let expected = replay.to_bytes().unwrap();
        replay.frames = Some(Vec::new());
        assert_eq!(replay.to_bytes().unwrap(), expected);
    }

    /// Rejects every write
    struct Full;

    impl io::Write for Full {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_errors_are_surfaced() {
        let err = write_replay(Full, &sample()).unwrap_err();
        assert!(matches!(err, EncodeError::Io(_)));
        assert_eq!(err.to_string(), "Unable to write replay: no space left");
    }
}
