//! # osrkit
//!
//! osrkit is an [osu!](https://osu.ppy.sh/) replay (`.osr`) parser and writer written in Rust
//! using [serde](https://github.com/serde-rs/serde) for serialization.
//!
//! A replay is decoded from an in-memory buffer. The cursor and key data embedded in the replay is
//! left compressed unless requested, as most consumers only care about the score.
//!
//! ```
//! use osrkit::{frames, Frame, Keys, ParserBuilder, Replay};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut replay = Replay::new();
//! replay.player_name = String::from("peppy");
//! replay.replay_data = frames::encode_frames(&[Frame {
//!     time: 16,
//!     x: 256.0,
//!     y: 192.0,
//!     keys: Keys::from_bits(1),
//! }])?;
//!
//! let data = replay.to_bytes()?;
//! let parsed = ParserBuilder::new(&data).must_parse_frames().parse()?;
//!
//! assert_eq!(parsed.player_name, "peppy");
//! assert_eq!(parsed.frames.unwrap()[0].x, 256.0);
//! # Ok(())
//! # }
//! ```

pub use self::errors::*;
pub use self::models::*;
pub use self::mods::Mods;
pub use self::parser::*;
pub use self::writer::write_replay;

pub mod compression;
mod core_parser;
mod core_writer;
mod errors;
pub mod frames;
mod models;
pub mod mods;
mod parser;
mod parsing_utils;
mod serde_utils;
pub mod ticks;
mod writer;
