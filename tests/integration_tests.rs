use osrkit::ParserBuilder;

macro_rules! frame_len_test {
    ($test_name: ident, $test_asset: expr, $frame_len: expr) => {
        #[test]
        fn $test_name() {
            let data = include_bytes!($test_asset);
            let parsing = ParserBuilder::new(&data[..]).must_parse_frames().parse();

            match parsing {
                Ok(replay) => assert_eq!(replay.frames.unwrap().len(), $frame_len),
                Err(ref e) => panic!("{}", e),
            }
        }
    };
}

macro_rules! round_trip_test {
    ($test_name: ident, $test_asset: expr) => {
        #[test]
        fn $test_name() {
            let data = include_bytes!($test_asset);
            let replay = ParserBuilder::new(&data[..]).parse().unwrap();
            assert_eq!(&replay.to_bytes().unwrap()[..], &data[..]);
        }
    };
}

frame_len_test!(test_cookiezi_frames, "../assets/replays/good/cookiezi.osr", 303);
frame_len_test!(test_mania_frames, "../assets/replays/good/mania_additional.osr", 4);

round_trip_test!(test_cookiezi_round_trip, "../assets/replays/good/cookiezi.osr");
round_trip_test!(test_mania_round_trip, "../assets/replays/good/mania_additional.osr");
round_trip_test!(test_bad_frame_round_trip, "../assets/replays/bad/bad_frame.osr");
