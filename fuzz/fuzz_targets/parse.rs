#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(replay) = osrkit::ParserBuilder::new(data).must_parse_frames().parse() {
        let _ = replay.to_bytes();
    }
});
