//! # Bit flags
//!
//! A replay stores the mods enabled during a play, as well as the keys held down at every frame, as
//! bit fields. The tables here name each bit so that a field can be displayed or built from names.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A named bit in a bit field
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct BitFlag {
    pub value: u32,
    pub short: &'static str,
    pub long: &'static str,
}

const fn flag(value: u32, short: &'static str, long: &'static str) -> BitFlag {
    BitFlag { value, short, long }
}

/// The mods a play can be set with. `NoMod` has a value of zero and so never matches a field.
pub static MODS: [BitFlag; 16] = [
    flag(0, "NM", "NoMod"),
    flag(1, "NF", "NoFail"),
    flag(2, "EZ", "Easy"),
    flag(4, "TD", "TouchDevice"),
    flag(8, "HD", "Hidden"),
    flag(16, "HR", "HardRock"),
    flag(32, "SD", "SuddenDeath"),
    flag(64, "DT", "DoubleTime"),
    flag(128, "RX", "Relax"),
    flag(256, "HT", "HalfTime"),
    flag(512, "NC", "NightCore"),
    flag(1024, "FL", "Flashlight"),
    flag(2048, "AT", "Auto"),
    flag(4096, "SO", "SpunOut"),
    flag(8192, "AP", "AutoPilot"),
    flag(16384, "PF", "Perfect"),
];

/// The input devices recorded in each frame of the replay data
pub static KEYS: [BitFlag; 5] = [
    flag(1, "M1", "MouseLeft"),
    flag(2, "M2", "MouseRight"),
    flag(4, "K1", "Key1"),
    flag(8, "K2", "Key2"),
    flag(16, "SM", "Smoke"),
];

static MODS_BY_SHORT: phf::Map<&'static str, u32> = phf::phf_map! {
    "NM" => 0,
    "NF" => 1,
    "EZ" => 2,
    "TD" => 4,
    "HD" => 8,
    "HR" => 16,
    "SD" => 32,
    "DT" => 64,
    "RX" => 128,
    "HT" => 256,
    "NC" => 512,
    "FL" => 1024,
    "AT" => 2048,
    "SO" => 4096,
    "AP" => 8192,
    "PF" => 16384,
};

/// Returns every flag in the table that is set in `bits`, in table order. A field of zero yields
/// no flags.
///
/// ```
/// use osrkit::mods::{parse_bit_flags, MODS};
/// let flags = parse_bit_flags(&MODS, 9);
/// let names: Vec<_> = flags.iter().map(|x| x.long).collect();
/// assert_eq!(names, vec!["NoFail", "Hidden"]);
/// ```
pub fn parse_bit_flags(table: &'static [BitFlag], bits: u32) -> Vec<&'static BitFlag> {
    if bits == 0 {
        return Vec::new();
    }

    table.iter().filter(|x| bits & x.value != 0).collect()
}

/// Combines flags back into a bit field
pub fn return_bit_flags<'a, I>(flags: I) -> u32
where
    I: IntoIterator<Item = &'a BitFlag>,
{
    flags.into_iter().fold(0, |acc, x| acc | x.value)
}

/// The mods bit field of a replay
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Mods(pub u32);

impl Mods {
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, value: u32) -> bool {
        value != 0 && self.0 & value == value
    }

    /// The named mods that are enabled
    pub fn iter(self) -> impl Iterator<Item = &'static BitFlag> {
        parse_bit_flags(&MODS, self.0).into_iter()
    }
}

impl From<u32> for Mods {
    fn from(bits: u32) -> Self {
        Mods(bits)
    }
}

/// Mods are displayed as their concatenated acronyms (eg: `HDDT`), with `NM` when none are enabled.
/// Bits without a name are not displayed.
impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str(MODS[0].short);
        }

        for flag in self.iter() {
            f.write_str(flag.short)?;
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ParseModsError(pub String);

impl std::error::Error for ParseModsError {}

impl fmt::Display for ParseModsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized mod acronym: {}", self.0)
    }
}

/// Parses concatenated two letter acronyms, case insensitive: `"HDHR"`, `"nfdt"`, or `""`.
impl FromStr for Mods {
    type Err = ParseModsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return Err(ParseModsError(String::from(s)));
        }

        let upper = s.to_ascii_uppercase();
        let mut bits = 0;
        for i in (0..upper.len()).step_by(2) {
            let short = &upper[i..i + 2];
            match MODS_BY_SHORT.get(short) {
                Some(value) => bits |= value,
                None => return Err(ParseModsError(String::from(&s[i..i + 2]))),
            }
        }

        Ok(Mods(bits))
    }
}
