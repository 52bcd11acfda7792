#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(frames) = osrkit::frames::parse_frames(text) {
            let _ = osrkit::frames::format_frames(&frames);
        }
    }
});
