use itertools::Itertools;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rookery::chess::game::{Game, GameStatus};
use rookery::chess::moves::Move;
use rookery::chess::perft::perft;
use rookery::chess::position::Position;
use rookery::error::{Error, FenField};
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};

/// Appends the default clocks to EPD records.
fn sanitize_fen(input: &str) -> String {
    let input = input.trim();
    if input.split(' ').count() == 4 {
        format!("{input} 0 1")
    } else {
        input.to_string()
    }
}

fn legal_position(input: &str) {
    let position = Position::try_from(input).expect("we are parsing valid position: {input}");
    assert_eq!(position.fen(), sanitize_fen(input));
}

#[test]
fn basic_positions() {
    // Full FEN.
    legal_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    legal_position("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34");
    legal_position("rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 7");
    legal_position("r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7");
    legal_position("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24");
    legal_position("r1b1qrk1/ppp2pbp/n2p1np1/4p1B1/2PPP3/2NB1N1P/PP3PP1/R2QK2R w KQ e6 0 9");
    legal_position("8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1");
    legal_position("rnbq1rk1/pp4pp/1b1ppn2/2p2p2/2PP4/1P2PN2/PB2BPPP/RN1Q1RK1 w - c6 0 9");
    // Trimmed FEN.
    legal_position("rnbqkb1r/pp2pppp/3p1n2/8/3NP3/2N5/PPP2PPP/R1BQKB1R b KQkq -");
}

#[test]
#[should_panic(expected = "expected 1 white king, got 0")]
fn no_white_king() {
    let _ = Position::try_from("3k4/8/8/8/8/8/8/8 w - - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "expected 1 black king, got 0")]
fn no_black_king() {
    let _ = Position::try_from("8/8/8/8/8/8/8/3K4 w - - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "expected 1 white king, got 3")]
fn too_many_kings() {
    let _ = Position::try_from("1kkk4/8/8/8/8/8/8/1KKK4 w - - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "expected <= 8 white pawns, got 9")]
fn too_many_white_pawns() {
    let _ =
        Position::try_from("rnbqkbnr/pppppppp/8/8/8/P7/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "expected <= 8 black pawns, got 9")]
fn too_many_black_pawns() {
    let _ =
        Position::try_from("rnbqkbnr/pppppppp/p7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "pawns can not be placed on backranks")]
fn pawns_on_backranks() {
    let _ = Position::try_from("3kr3/8/8/8/8/5Q2/8/1KP5 w - - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "expected en passant square to be on rank 6, got 3")]
fn wrong_en_passant_player() {
    let _ =
        Position::try_from("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1")
            .unwrap();
}

#[test]
#[should_panic(expected = "expected en passant square to be on rank 3, got 4")]
fn wrong_en_passant_rank() {
    let _ =
        Position::try_from("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq e4 0 1")
            .unwrap();
}

#[test]
#[should_panic(expected = "en passant square is not beyond pushed pawn")]
fn en_passant_not_beyond_pawn() {
    let _ =
        Position::try_from("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq d3 0 1")
            .unwrap();
}

#[test]
#[should_panic(expected = "more than 1 check after double pawn push is impossible")]
fn en_passant_double_check() {
    let _ = Position::try_from("r2qkbnr/ppp3Np/8/4Q3/4P3/8/PP4PP/RNB1KB1R b KQkq e3 0 1")
        .unwrap();
}

#[test]
#[should_panic(expected = "expected <= 2 checks, got 3")]
fn tripple_check() {
    let _ = Position::try_from("2r3r1/P3k3/prp5/1B5p/5P2/2Q1n2p/PP4KP/3R4 w - - 0 34").unwrap();
}

#[test]
#[should_panic(
    expected = "the only possible checks after double pawn push are either discovery targeting the \
    original pawn square or the pushed pawn itself"
)]
fn check_with_unrelated_en_passant() {
    let _ =
        Position::try_from("rnbqk1nr/bb3p1p/1q2r3/2pPp3/3P4/7P/1PP1NpPP/R1BQKBNR w KQkq c6 0 1")
            .unwrap();
}

#[test]
#[should_panic(expected = "doubly pushed pawn can not be the only blocker on a diagonal")]
fn double_push_blocks_existing_check() {
    let _ = Position::try_from("q6k/8/8/3pP3/8/8/8/7K w - d6 0 1").unwrap();
}

#[test]
#[should_panic(expected = "Q castling requires king and rook on original squares")]
fn castling_without_rook() {
    let _ = Position::try_from("r3k2r/8/8/8/8/8/8/4K2R w Qkq - 0 1").unwrap();
}

#[test]
#[should_panic(expected = "king is in check while")]
fn opponent_in_check() {
    let _ = Position::try_from("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
}

fn field(input: &str) -> FenField {
    match Position::from_fen(input) {
        Err(Error::MalformedFen { field, .. }) => field,
        other => panic!("expected malformed FEN for {input:?}, got {other:?}"),
    }
}

#[test]
fn malformed_fields() {
    assert_eq!(field("8/8/8/8/8/8/8/8"), FenField::FieldCount);
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
        FenField::FieldCount
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
        FenField::PiecePlacement
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        FenField::PiecePlacement
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
        FenField::SideToMove
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1"),
        FenField::CastlingRights
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1"),
        FenField::EnPassant
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 256 1"),
        FenField::HalfmoveClock
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1"),
        FenField::HalfmoveClock
    );
    assert_eq!(
        field("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"),
        FenField::FullmoveNumber
    );
}

#[test]
fn clean_board_str() {
    // Prefix with "fen".
    assert!(Position::try_from(
        "fen rn1qkb1r/pp3ppp/2p1pn2/3p1b2/2PP4/5NP1/PP2PPBP/RNBQK2R w KQkq - 0 1"
    )
    .is_ok());
    // Prefix with "epd".
    assert!(Position::try_from(
        "epd rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -"
    )
    .is_ok());
    // No prefix: infer EPD.
    assert!(Position::try_from("rnbqkbnr/pp2pppp/8/3p4/3P4/3B4/PPP2PPP/RNBQK1NR b KQkq -").is_ok());
    // No prefix: infer FEN.
    assert!(
        Position::try_from("rnbqkbnr/pp2pppp/8/3p4/3P4/3B4/PPP2PPP/RNBQK1NR b KQkq - 0 1").is_ok()
    );
    // Don't crash on unicode symbols.
    assert!(Position::try_from("8/8/8/8/8/8/8/8 b 88 🔠 🔠 ").is_err());
    // Whitespaces at the start/end of the input are not accepted in from_fen but
    // will be cleaned up by try_from.
    assert!(Position::try_from(
        "rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -\n"
    )
    .is_ok());
    assert!(Position::try_from(
        "\n epd rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -"
    )
    .is_ok());
}

#[test]
fn no_crash() {
    assert!(Position::try_from("3k2p1N/82/8/8/7B/6K1/3R4/8 b - - 0 1").is_err());
    assert!(Position::try_from("3kn3/R2p1N2/8/8/70000000000000000B/6K1/3R4/8 b - - 0 1").is_err());
    assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3R4/8 b - - 0 48 b - - 0 4/8 b").is_err());
    assert!(Position::try_from("\tfen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
    assert!(Position::try_from("fen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
    assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3r4/8 b - - +8 1").is_err());
    assert!(Position::from_fen(
        "\n epd rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -\n"
    )
    .is_err());
}

fn setup(input: &str) -> Position {
    Position::try_from(input).expect("parsing legal position: {input}")
}

fn get_moves(position: &Position) -> Vec<String> {
    position
        .generate_moves()
        .iter()
        .map(Move::to_string)
        .sorted()
        .collect::<Vec<_>>()
}

fn sorted_moves(moves: &[&str]) -> Vec<String> {
    moves
        .iter()
        .map(|m| (*m).to_string())
        .sorted()
        .collect::<Vec<_>>()
}

#[test]
fn starting_moves_generation() {
    assert_eq!(
        get_moves(&Position::starting()),
        sorted_moves(&[
            "a2a3", "a2a4", "b1a3", "b1c3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3",
            "e2e4", "f2f3", "f2f4", "g1f3", "g1h3", "g2g3", "g2g4", "h2h3", "h2h4"
        ])
    );
}

#[test]
fn basic_moves_generation() {
    assert_eq!(
        get_moves(&setup("2n4k/1PP5/6K1/3Pp1Q1/3N4/3P4/P3R3/8 w - e6 0 1")),
        sorted_moves(&[
            "a2a3", "a2a4", "d5d6", "d5e6", "b7b8q", "b7b8r", "b7b8b", "b7b8n", "b7c8q", "b7c8r",
            "b7c8b", "b7c8n", "e2e1", "e2e3", "e2e4", "e2e5", "e2b2", "e2c2", "e2d2", "e2f2",
            "e2g2", "e2h2", "d4b3", "d4c2", "d4f3", "d4b5", "d4c6", "d4e6", "d4f5", "g5c1", "g5d2",
            "g5e3", "g5f4", "g5g4", "g5g3", "g5g2", "g5g1", "g5h4", "g5e5", "g5f5", "g5h5", "g5h6",
            "g5f6", "g5e7", "g5d8", "g6f5", "g6h5", "g6f6", "g6h6", "g6f7",
        ])
    );
}

#[test]
fn double_check_evasions() {
    assert_eq!(
        get_moves(&setup("3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 1")),
        sorted_moves(&["d8c8"])
    );
    assert_eq!(
        get_moves(&setup("8/5Nk1/7p/4Bp2/3q4/8/8/5KR1 b - - 0 1")),
        sorted_moves(&["g7f8", "g7f7", "g7h7"])
    );
    assert_eq!(
        get_moves(&setup("8/5Pk1/7p/4Bp2/3q4/8/8/5KR1 b - - 0 1")),
        sorted_moves(&["g7f8", "g7f7", "g7h7"])
    );
}

#[test]
fn check_evasions() {
    assert_eq!(
        get_moves(&setup("3kn3/R2p4/8/6B1/8/6K1/3R4/8 b - - 0 1")),
        sorted_moves(&["e8f6", "d8c8"])
    );
    assert_eq!(
        get_moves(&setup("2R5/8/6k1/8/8/8/PPn5/KR6 w - - 0 1")),
        sorted_moves(&["c8c2"])
    );
}

#[test]
fn pins() {
    // The pawn is pinned but can capture en passant.
    assert_eq!(
        get_moves(&setup("6qk/8/8/3Pp3/8/8/K7/8 w - e6 0 1")),
        sorted_moves(&["a2a1", "a2a3", "a2b1", "a2b2", "a2b3", "d5e6"])
    );
    // The pawn is pinned but there is no en passant: it can't move.
    assert_eq!(
        get_moves(&setup("6qk/8/8/3Pp3/8/8/K7/8 w - - 0 1")),
        sorted_moves(&["a2a1", "a2a3", "a2b1", "a2b2", "a2b3"])
    );
    // The pawn is pinned and can't move.
    assert_eq!(
        get_moves(&setup("k7/1p6/8/8/8/8/8/4K2B b - - 0 1")),
        sorted_moves(&["a8a7", "a8b8"])
    );
}

// Artifacts from the fuzzer or perft.
#[test]
fn fuzzing_artifact_moves() {
    assert_eq!(
        get_moves(&setup(
            "2r3r1/3p3k/1p3pp1/1B5P/5P2/2P1pqP1/PP4KP/3R4 w - - 0 34"
        )),
        sorted_moves(&["g2g1", "g2f3", "g2h3"])
    );
    // En passant would expose the king on the rank.
    assert_eq!(
        get_moves(&setup("K7/8/8/8/1R2Pp1k/8/8/8 b - e3 0 1")),
        sorted_moves(&["h4h5", "h4h3", "h4g4", "h4g5", "h4g3", "f4f3"])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/3p3k/1p3pp1/1B5P/5p2/2P1p1P1/PP4KP/3R4 w - - 0 34"
        )),
        sorted_moves(&[
            "a2a3", "a2a4", "b2b3", "b2b4", "c3c4", "b5a4", "b5a6", "b5c6", "b5d7", "b5c4", "b5d3",
            "b5e2", "b5f1", "g3g4", "h2h3", "h2h4", "h5h6", "h5g6", "g2f3", "g2f1", "g2g1", "g2h3",
            "g2h1", "d1a1", "d1b1", "d1c1", "d1e1", "d1f1", "d1g1", "d1h1", "d1d2", "d1d3", "d1d4",
            "d1d5", "d1d6", "d1d7", "g3f4",
        ])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/3p3k/1p3pp1/1B5p/5P2/2P2pP1/PP4KP/3R4 w - - 0 34"
        )),
        sorted_moves(&["g2f1", "g2f2", "g2f3", "g2g1", "g2h1", "g2h3"])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/P3k3/pp3p2/1B5p/5P2/2P3pP/PP4KP/3R4 w - - 0 1"
        )),
        sorted_moves(&[
            "a2a3", "a2a4", "a7a8b", "a7a8n", "a7a8q", "a7a8r", "b2b3", "b2b4", "b5a4", "b5a6",
            "b5c4", "b5c6", "b5d3", "b5d7", "b5e2", "b5e8", "b5f1", "c3c4", "d1a1", "d1b1", "d1c1",
            "d1d2", "d1d3", "d1d4", "d1d5", "d1d6", "d1d7", "d1d8", "d1e1", "d1f1", "d1g1", "d1h1",
            "f4f5", "g2f1", "g2f3", "g2g1", "g2h1", "h2g3", "h3h4",
        ])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/p3k3/pp3p2/1B5p/5P2/2pqp1P1/PPK4P/3R4 w - - 0 34"
        )),
        sorted_moves(&["b5d3", "c2b3", "c2c1", "c2d3", "d1d3"])
    );
    assert_eq!(
        get_moves(&setup(
            "2r3r1/p3k3/pp3p2/1B5p/5P2/2P1p1P1/PP4Kr/3R4 w - - 0 1"
        )),
        sorted_moves(&["g2f1", "g2f3", "g2g1", "g2h2"])
    );
    assert_eq!(
        get_moves(&setup("r3k3/r7/8/5pP1/5QKN/8/8/6RR w - f6 0 1")),
        sorted_moves(&["f4f5", "h4f5", "g4f5", "g4f3", "g4g3", "g4h3", "g5f6", "g4h5"])
    );
    assert_eq!(
        get_moves(&setup("4k1r1/8/8/4PpP1/6K1/8/8/8 w - f6 0 1")),
        sorted_moves(&["g4f4", "g4f3", "g4f5", "g4g3", "g4h3", "g4h4", "g4h5", "e5f6"])
    );
    assert_eq!(
        get_moves(&setup("8/2p5/3p4/1P5r/KR3p1k/8/4P1P1/8 b - - 1 1")),
        sorted_moves(&[
            "c7c6", "c7c5", "d6d5", "h5b5", "h5c5", "h5d5", "h5e5", "h5g5", "h5f5", "h5h6", "h5h7",
            "h5h8", "h4g4", "h4g5", "h4g3"
        ])
    );
}

#[test]
fn castle() {
    // Can castle both sides.
    assert_eq!(
        get_moves(&setup("r3k2r/8/8/8/8/8/6N1/4K3 b kq - 0 1")),
        sorted_moves(&[
            "a8a7", "a8a6", "a8a5", "a8a4", "a8a3", "a8a2", "a8a1", "a8b8", "a8c8", "a8d8", "h8f8",
            "h8g8", "h8h7", "h8h6", "h8h5", "h8h4", "h8h3", "h8h2", "h8h1", "e8e7", "e8d8", "e8d7",
            "e8f8", "e8f7", "e8c8", "e8g8"
        ])
    );
    // Castling short blocked by a check.
    assert_eq!(
        get_moves(&setup("r3k2r/8/8/8/8/8/6R1/4K3 b kq - 0 1")),
        sorted_moves(&[
            "a8a7", "a8a6", "a8a5", "a8a4", "a8a3", "a8a2", "a8a1", "a8b8", "a8c8", "a8d8", "h8f8",
            "h8g8", "h8h7", "h8h6", "h8h5", "h8h4", "h8h3", "h8h2", "h8h1", "e8e7", "e8d8", "e8d7",
            "e8f8", "e8f7", "e8c8"
        ])
    );
    // Castling short blocked by our piece, castling long is not available.
    assert_eq!(
        get_moves(&setup("r3k2r/8/8/8/8/8/6R1/4K3 b k - 0 1")),
        sorted_moves(&[
            "a8a7", "a8a6", "a8a5", "a8a4", "a8a3", "a8a2", "a8a1", "a8b8", "a8c8", "a8d8", "h8f8",
            "h8g8", "h8h7", "h8h6", "h8h5", "h8h4", "h8h3", "h8h2", "h8h1", "e8e7", "e8d8", "e8d7",
            "e8f8", "e8f7"
        ])
    );
    // Castling long is not blocked: the attacked square is not the one king will
    // walk through.
    assert_eq!(
        get_moves(&setup("r3k2r/8/8/8/8/8/1R6/4K3 b q - 0 1")),
        sorted_moves(&[
            "a8a7", "a8a6", "a8a5", "a8a4", "a8a3", "a8a2", "a8a1", "a8b8", "a8c8", "a8d8", "h8f8",
            "h8g8", "h8h7", "h8h6", "h8h5", "h8h4", "h8h3", "h8h2", "h8h1", "e8e7", "e8d8", "e8d7",
            "e8f8", "e8f7", "e8c8"
        ])
    );
    // Castling long is blocked by an attack and the king is cut off.
    assert_eq!(
        get_moves(&setup("r3k2r/8/8/8/8/8/3R4/4K3 b kq - 0 1")),
        sorted_moves(&[
            "a8a7", "a8a6", "a8a5", "a8a4", "a8a3", "a8a2", "a8a1", "a8b8", "a8c8", "a8d8", "h8f8",
            "h8g8", "h8h7", "h8h6", "h8h5", "h8h4", "h8h3", "h8h2", "h8h1", "e8e7", "e8f8", "e8f7",
            "e8g8"
        ])
    );
}

fn play(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        let _ = game
            .play_uci(uci)
            .unwrap_or_else(|e| panic!("{uci}: {e}"));
    }
}

fn is_legal(game: &Game, uci: &str) -> bool {
    game.legal_moves().iter().any(|m| m.to_string() == uci)
}

#[test]
fn castling_rights_are_lost_for_good() {
    // The king went away and came back.
    let mut game = Game::new(setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"));
    assert!(is_legal(&game, "e1g1"));
    assert!(is_legal(&game, "e1c1"));
    play(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert_eq!(game.position().fen(), "r3k2r/8/8/8/8/8/8/R3K2R w - - 4 3");
    assert!(!is_legal(&game, "e1g1"));
    assert!(!is_legal(&game, "e1c1"));
    play(&mut game, &["a1b1"]);
    assert!(!is_legal(&game, "e8g8"));
    assert!(!is_legal(&game, "e8c8"));

    // The rook went away and came back.
    let mut game = Game::new(setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"));
    play(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert!(!is_legal(&game, "e1g1"));
    assert!(is_legal(&game, "e1c1"));
    play(&mut game, &["e1d1"]);
    assert!(is_legal(&game, "e8g8"));
    assert!(!is_legal(&game, "e8c8"));

    // The rook was captured.
    let mut game = Game::new(setup("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1"));
    play(&mut game, &["g2a8"]);
    assert_eq!(game.position().fen(), "B3k2r/8/8/8/8/8/8/R3K2R b KQk - 0 1");
    assert!(!is_legal(&game, "e8c8"));
    assert!(is_legal(&game, "e8g8"));
}

#[test]
fn en_passant_only_right_after_double_push() {
    let mut game = Game::default();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(is_legal(&game, "e5d6"));
    play(&mut game, &["g1f3", "h7h6"]);
    assert!(!is_legal(&game, "e5d6"));
    assert_eq!(game.position().en_passant_square(), None);
}

#[test]
fn terminal_positions() {
    // Back rank mate.
    let position = setup("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let mut game = Game::new(position);
    play(&mut game, &["a1a8"]);
    assert!(game.position().is_checkmate());
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: rookery::chess::core::Color::White
        }
    );
    // Smothered mate.
    let position = setup("6rk/5Npp/8/8/8/8/8/6K1 b - - 0 1");
    assert!(position.is_checkmate());
    assert!(!position.is_stalemate());
    // Classic king and pawn stalemate.
    let position = setup("5k2/5P2/5K2/8/8/8/8/8 b - - 0 1");
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
    assert_eq!(Game::new(position).status(), GameStatus::Stalemate);
    // Not over: the king can escape.
    let position = setup("6k1/8/8/8/8/8/8/R5K1 b - - 0 1");
    assert!(!position.is_checkmate());
    assert!(!position.is_stalemate());
}

#[test]
fn chess_programming_wiki_perft_positions() {
    // Positions from https://www.chessprogramming.org/Perft_Results with
    // depth=1.
    // Position 2 ("kiwipete").
    assert_eq!(
        get_moves(&setup(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        ))
        .len(),
        48
    );
    // Position 3.
    assert_eq!(
        get_moves(&setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")).len(),
        14,
    );
    // Position 4.
    assert_eq!(
        get_moves(&setup(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1"
        ))
        .len(),
        6
    );
    // Mirrored.
    assert_eq!(
        get_moves(&setup(
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1"
        ))
        .len(),
        6
    );
    // Position 5.
    assert_eq!(
        get_moves(&setup(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8"
        ))
        .len(),
        44
    );
    // Position 6.
    assert_eq!(
        get_moves(&setup(
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10"
        ))
        .len(),
        46
    );
}

#[test]
fn perft_starting_position() {
    let position = Position::starting();
    assert_eq!(perft(&position, 0), 1);
    assert_eq!(perft(&position, 1), 20);
    assert_eq!(perft(&position, 2), 400);
    assert_eq!(perft(&position, 3), 8902);
    assert_eq!(perft(&position, 4), 197_281);
}

// Position 2.
#[test]
fn perft_kiwipete() {
    let position = setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ");
    assert_eq!(perft(&position, 1), 48);
    assert_eq!(perft(&position, 2), 2039);
    assert_eq!(perft(&position, 3), 97862);
}

// Position 3.
#[test]
fn perft_endgame() {
    let position = setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2812);
    assert_eq!(perft(&position, 4), 43238);
}

// Position 4.
#[test]
fn perft_complex() {
    let position = setup("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1");
    assert_eq!(perft(&position, 1), 6);
    assert_eq!(perft(&position, 2), 264);
    assert_eq!(perft(&position, 3), 9467);
}

// Position 5.
#[test]
fn perft_fifth() {
    let position = setup("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
    assert_eq!(perft(&position, 1), 44);
    assert_eq!(perft(&position, 2), 1486);
    assert_eq!(perft(&position, 3), 62379);
}

// Position 6.
#[test]
fn perft_sixth() {
    let position =
        setup("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10");
    assert_eq!(perft(&position, 1), 46);
    assert_eq!(perft(&position, 2), 2079);
    assert_eq!(perft(&position, 3), 89890);
}

// These are very expensive in the Debug setting: disable them by default.
#[ignore]
#[test]
fn perft_deep() {
    assert_eq!(perft(&Position::starting(), 5), 4_865_609);
    assert_eq!(
        perft(
            &setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
            4
        ),
        4_085_603
    );
    assert_eq!(
        perft(&setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"), 5),
        674_624
    );
    assert_eq!(
        perft(
            &setup("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1"),
            4
        ),
        422_333
    );
    assert_eq!(
        perft(
            &setup("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8"),
            4
        ),
        2_103_487
    );
    assert_eq!(
        perft(
            &setup("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10"),
            4
        ),
        3_894_594
    );
}

fn shakmaty_position(fen: &str) -> Option<Chess> {
    let setup: shakmaty::fen::Fen = fen.parse().ok()?;
    setup.into_position(CastlingMode::Standard).ok()
}

fn shakmaty_moves(position: &Chess) -> Vec<String> {
    position
        .legal_moves()
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .sorted()
        .collect()
}

const CROSS_CHECK_CORPUS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "2n4k/1PP5/6K1/3Pp1Q1/3N4/3P4/P3R3/8 w - e6 0 1",
    "3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 1",
    "6qk/8/8/3Pp3/8/8/K7/8 w - e6 0 1",
    "K7/8/8/8/1R2Pp1k/8/8/8 b - e3 0 1",
    "r3k3/r7/8/5pP1/5QKN/8/8/6RR w - f6 0 1",
    "4k1r1/8/8/4PpP1/6K1/8/8/8 w - f6 0 1",
    "2r3r1/P3k3/pp3p2/1B5p/5P2/2P3pP/PP4KP/3R4 w - - 0 1",
    "r3k2r/8/8/8/8/8/3R4/4K3 b kq - 0 1",
];

#[test]
fn shakmaty_cross_check() {
    for fen in CROSS_CHECK_CORPUS {
        let Some(reference) = shakmaty_position(fen) else {
            continue;
        };
        assert_eq!(get_moves(&setup(fen)), shakmaty_moves(&reference), "{fen}");
    }
}

#[test]
fn random_games_agree_with_shakmaty() {
    let mut rng = StdRng::seed_from_u64(42);
    for fen in CROSS_CHECK_CORPUS {
        let Some(mut reference) = shakmaty_position(fen) else {
            continue;
        };
        let mut position = setup(fen);
        for _ in 0..40 {
            let moves = position.generate_moves();
            assert_eq!(
                moves.iter().map(Move::to_string).sorted().collect::<Vec<_>>(),
                shakmaty_moves(&reference),
                "{position}"
            );
            let Some(&next_move) = moves.choose(&mut rng) else {
                break;
            };
            let before = position.clone();
            let undo = position.make_move(next_move).expect("legal move");
            let mut restored = position.clone();
            restored.unmake_move(next_move, undo);
            assert_eq!(restored, before, "unmake {next_move:?} in {before}");

            let uci = next_move.to_string();
            let reference_move = reference
                .legal_moves()
                .into_iter()
                .find(|m| m.to_uci(CastlingMode::Standard).to_string() == uci)
                .expect("both generators agree on legal moves");
            reference = reference.play(&reference_move).expect("legal move");
            assert_eq!(
                position.fen().split(' ').next(),
                Some(reference.board().to_string().as_str())
            );
            assert_eq!(u32::from(position.halfmove_clock()), reference.halfmoves());
        }
    }
}
