//! Reads a replay from stdin and writes it, frames included, as JSON to stdout
//!
//! ```plain
//! cargo run --example json < assets/replays/good/cookiezi.osr
//! ```

use osrkit::ParserBuilder;
use std::io::{self, Read};

fn main() {
    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .expect("to read stdin");

    let replay = ParserBuilder::new(&data)
        .must_parse_frames()
        .parse()
        .unwrap();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &replay).unwrap();
}
