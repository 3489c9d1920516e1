#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use rookery::chess::position::Position;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(position) = Position::try_from(s) {
            // Printing the position back to FEN is lossless.
            let fen = position.fen();
            assert_eq!(Position::from_fen(&fen).map(|p| p.fen()), Ok(fen));
        }
    }
});
