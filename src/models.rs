//! # Models
//!
//! Here lies the data structures that an osu! replay is decoded into.
//!
//! For serde, we only care about serialization, JSON serialization. Deserialization is not
//! implemented as the output is meant to be consumed by other tools, not fed back into this one.
//! Writing a replay goes through the binary encoder instead.
use crate::mods::Mods;
use crate::serde_utils::{byte_len, display_it};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The structure that an osu! replay is parsed into.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct Replay {
    #[serde(serialize_with = "display_it")]
    pub mode: GameMode,

    /// Version of the game client that recorded the replay (eg: `20240123`)
    pub version: i32,

    /// MD5 hash of the beatmap that was played
    pub beatmap_hash: String,
    pub player_name: String,

    /// MD5 hash of the replay itself
    pub replay_hash: String,
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
    pub score: i32,
    pub max_combo: i16,

    /// No misses and no slider breaks
    pub perfect: bool,
    pub mods: Mods,

    /// Health over time as comma separated `time|health` pairs. Kept as is.
    pub life_bar: String,

    /// When the play was set. Only precise to the second.
    pub timestamp: DateTime<Utc>,

    /// The compressed frames. This is what is written out when encoding a replay, even when
    /// `frames` has been populated.
    #[serde(rename = "replay_data_len", serialize_with = "byte_len")]
    pub replay_data: Vec<u8>,
    pub online_id: i64,

    /// Trailing modifier that only some replays carry. It's only written back out when nonzero,
    /// so a replay with an explicit zero loses the field when re-encoded.
    pub additional_mods: Option<f64>,

    /// The decoded replay data, present only when the parser was asked to decode frames
    pub frames: Option<Vec<Frame>>,
}

impl Replay {
    /// An empty replay timestamped with the current time
    pub fn new() -> Self {
        Replay {
            mode: GameMode::Standard,
            version: 0,
            beatmap_hash: String::new(),
            player_name: String::new(),
            replay_hash: String::new(),
            count_300: 0,
            count_100: 0,
            count_50: 0,
            count_geki: 0,
            count_katu: 0,
            count_miss: 0,
            score: 0,
            max_combo: 0,
            perfect: false,
            mods: Mods::default(),
            life_bar: String::new(),
            timestamp: Utc::now(),
            replay_data: Vec::new(),
            online_id: 0,
            additional_mods: None,
            frames: None,
        }
    }

    /// The additional mods value or zero when absent
    pub fn additional_mods_value(&self) -> f64 {
        self.additional_mods.unwrap_or(0.0)
    }
}

impl Default for Replay {
    fn default() -> Self {
        Replay::new()
    }
}

/// A human readable summary of the replay's header
impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gamemode: {}", self.mode)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Beatmap Hash: {}", self.beatmap_hash)?;
        writeln!(f, "Player Name: {}", self.player_name)?;
        writeln!(f, "Replay Hash: {}", self.replay_hash)?;
        writeln!(f, "Count 300s: {}", self.count_300)?;
        writeln!(f, "Count Geki: {}", self.count_geki)?;
        writeln!(f, "Count 100s: {}", self.count_100)?;
        writeln!(f, "Count Katu: {}", self.count_katu)?;
        writeln!(f, "Count 50s: {}", self.count_50)?;
        writeln!(f, "Count Misses: {}", self.count_miss)?;
        writeln!(f, "Total Score: {}", self.score)?;
        writeln!(f, "Combo: {}", self.max_combo)?;
        writeln!(f, "Mods: {} ({})", self.mods, self.mods.bits())?;
        writeln!(f, "Perfect Combo: {}", self.perfect)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Life Bar: {}", self.life_bar)?;
        writeln!(f, "Replay Data Length: {}", self.replay_data.len())?;
        writeln!(f, "Online Score Id: {}", self.online_id)
    }
}

/// The ruleset the replay was played in. Unrecognized values are kept so that they can be written
/// back out.
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum GameMode {
    Standard,
    Taiko,
    CatchTheBeat,
    Mania,
    Unknown(i8),
}

impl GameMode {
    pub fn raw(self) -> i8 {
        match self {
            GameMode::Standard => 0,
            GameMode::Taiko => 1,
            GameMode::CatchTheBeat => 2,
            GameMode::Mania => 3,
            GameMode::Unknown(x) => x,
        }
    }
}

impl From<i8> for GameMode {
    fn from(raw: i8) -> Self {
        match raw {
            0 => GameMode::Standard,
            1 => GameMode::Taiko,
            2 => GameMode::CatchTheBeat,
            3 => GameMode::Mania,
            x => GameMode::Unknown(x),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Standard => f.write_str("Standard"),
            GameMode::Taiko => f.write_str("Taiko"),
            GameMode::CatchTheBeat => f.write_str("Catch The Beat"),
            GameMode::Mania => f.write_str("Mania"),
            GameMode::Unknown(x) => write!(f, "Unknown ({})", x),
        }
    }
}

/// A single sample of the cursor and keys held down.
#[derive(Serialize, PartialEq, Debug, Clone, Copy, Default)]
pub struct Frame {
    /// Milliseconds as written by the client. Whether this is relative to the previous frame or
    /// absolute is left to the caller, so it is never accumulated here.
    pub time: i64,
    pub x: f32,
    pub y: f32,
    pub keys: Keys,
}

/// The input devices held down during a frame
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Keys {
    pub mouse_left: bool,
    pub mouse_right: bool,
    pub k1: bool,
    pub k2: bool,
    pub smoke: bool,
}

impl Keys {
    pub const MOUSE_LEFT: i64 = 1;
    pub const MOUSE_RIGHT: i64 = 2;
    pub const K1: i64 = 4;
    pub const K2: i64 = 8;
    pub const SMOKE: i64 = 16;

    /// Each bit is independent of the others. Bits outside of the five known are dropped.
    ///
    /// ```
    /// use osrkit::Keys;
    /// let keys = Keys::from_bits(5);
    /// assert!(keys.mouse_left && keys.k1);
    /// assert!(!keys.mouse_right && !keys.k2 && !keys.smoke);
    /// assert_eq!(keys.bits(), 5);
    /// ```
    pub fn from_bits(bits: i64) -> Self {
        Keys {
            mouse_left: bits & Keys::MOUSE_LEFT != 0,
            mouse_right: bits & Keys::MOUSE_RIGHT != 0,
            k1: bits & Keys::K1 != 0,
            k2: bits & Keys::K2 != 0,
            smoke: bits & Keys::SMOKE != 0,
        }
    }

    pub fn bits(&self) -> i64 {
        [
            (self.mouse_left, Keys::MOUSE_LEFT),
            (self.mouse_right, Keys::MOUSE_RIGHT),
            (self.k1, Keys::K1),
            (self.k2, Keys::K2),
            (self.smoke, Keys::SMOKE),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, bit)| bit)
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json<T: serde::Serialize>(input: &T) -> std::string::String {
        serde_json::to_string(input).unwrap()
    }

    #[test]
    fn game_mode_round_trip() {
        for raw in i8::MIN..=i8::MAX {
            assert_eq!(GameMode::from(raw).raw(), raw);
        }
        assert_eq!(GameMode::from(2), GameMode::CatchTheBeat);
        assert_eq!(GameMode::from(9), GameMode::Unknown(9));
    }

    #[test]
    fn game_mode_display() {
        assert_eq!(GameMode::Standard.to_string(), "Standard");
        assert_eq!(GameMode::CatchTheBeat.to_string(), "Catch The Beat");
        assert_eq!(GameMode::Unknown(-3).to_string(), "Unknown (-3)");
    }

    #[test]
    fn keys_bits() {
        assert_eq!(Keys::from_bits(0), Keys::default());
        assert_eq!(Keys::from_bits(31).bits(), 31);
        assert_eq!(Keys::from_bits(32 | 16).bits(), 16);

        let keys = Keys {
            mouse_right: true,
            k2: true,
            ..Keys::default()
        };
        assert_eq!(keys.bits(), 10);
    }

    #[test]
    fn negative_bits() {
        let keys = Keys::from_bits(-1);
        assert!(keys.mouse_left && keys.mouse_right && keys.k1 && keys.k2 && keys.smoke);
    }

    #[test]
    fn serialize_frame() {
        let frame = Frame {
            time: 16,
            x: 256.5,
            y: -1.0,
            keys: Keys::from_bits(1),
        };
        assert_eq!(
            to_json(&frame),
            r#"{"time":16,"x":256.5,"y":-1.0,"keys":{"mouse_left":true,"mouse_right":false,"k1":false,"k2":false,"smoke":false}}"#
        );
    }

    #[test]
    fn serialize_replay_mode_and_mods() {
        let mut replay = Replay::new();
        replay.mode = GameMode::Mania;
        replay.mods = Mods(24);
        replay.replay_data = vec![1, 2, 3];
        let json = to_json(&replay);
        assert!(json.contains(r#""mode":"Mania""#));
        assert!(json.contains(r#""mods":24"#));
        assert!(json.contains(r#""additional_mods":null"#));
        assert!(json.contains(r#""replay_data_len":3"#));
    }
}
