use jiangjun_core::movegen::{generate_destinations, has_legal_move, in_check};
use jiangjun_core::position::Position;
use jiangjun_core::types::{Color, Square};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PerftBaseline {
    fen: String,
    depth: u8,
    nodes: u64,
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).expect("valid square")
}

fn sorted_destinations(position: &Position, square: Square) -> Vec<Square> {
    let mut out = position.destinations(square).to_vec();
    out.sort();
    out
}

fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            let (next, _) = position.apply_move(mv).expect("apply move");
            perft(&next, depth - 1)
        })
        .sum()
}

#[test]
fn horse_leg_blocks_only_the_jumps_through_it() {
    let open = Position::from_fen("5k3/9/9/9/9/4N4/9/9/9/3K5 w").expect("fen");
    assert_eq!(open.destinations(sq(5, 4)).len(), 8);

    let blocked = Position::from_fen("5k3/9/9/9/4p4/4N4/9/9/9/3K5 w").expect("fen");
    assert_eq!(
        sorted_destinations(&blocked, sq(5, 4)),
        vec![sq(4, 2), sq(4, 6), sq(6, 2), sq(6, 6), sq(7, 3), sq(7, 5)]
    );
}

#[test]
fn elephant_eye_and_river() {
    let position = Position::from_fen("5k3/9/9/9/9/9/3p5/2B6/9/3K5 w").expect("fen");
    assert_eq!(
        sorted_destinations(&position, sq(7, 2)),
        vec![sq(5, 0), sq(9, 0), sq(9, 4)]
    );

    let at_river = Position::from_fen("5k3/9/9/9/9/2B6/9/9/9/3K5 w").expect("fen");
    assert_eq!(
        sorted_destinations(&at_river, sq(5, 2)),
        vec![sq(7, 0), sq(7, 4)]
    );
}

#[test]
fn cannon_needs_exactly_one_screen_to_capture() {
    let no_screen = Position::from_fen("3k5/r8/9/9/9/C8/9/9/9/4K4 w").expect("fen");
    let dests = no_screen.destinations(sq(5, 0));
    assert!(!dests.contains(&sq(1, 0)));
    assert!(dests.contains(&sq(2, 0)));

    let one_screen = Position::from_fen("3k5/r8/9/P8/9/C8/9/9/9/4K4 w").expect("fen");
    let dests = one_screen.destinations(sq(5, 0));
    assert!(dests.contains(&sq(1, 0)));
    assert!(dests.contains(&sq(4, 0)));
    assert!(!dests.contains(&sq(2, 0)));
    assert!(!dests.contains(&sq(3, 0)));

    let two_screens = Position::from_fen("3k5/r8/P8/P8/9/C8/9/9/9/4K4 w").expect("fen");
    let dests = two_screens.destinations(sq(5, 0));
    assert!(!dests.contains(&sq(1, 0)));
    assert!(!dests.contains(&sq(2, 0)));
    assert!(dests.contains(&sq(4, 0)));
}

#[test]
fn generals_on_an_open_file_can_capture_each_other() {
    let position = Position::from_fen("4k4/9/9/9/9/9/9/9/9/4K4 w").expect("fen");
    assert!(position.destinations(sq(9, 4)).contains(&sq(0, 4)));
    assert!(position.destinations(sq(0, 4)).contains(&sq(9, 4)));
    assert!(position.legal_destinations(sq(9, 4)).contains(&sq(0, 4)));
    assert!(in_check(&position.board, Color::Red));
    assert!(in_check(&position.board, Color::Black));

    let screened = Position::from_fen("4k4/9/9/9/4p4/9/9/9/9/4K4 w").expect("fen");
    assert!(!screened.destinations(sq(9, 4)).contains(&sq(0, 4)));
    assert!(!in_check(&screened.board, Color::Red));
}

#[test]
fn soldier_moves_sideways_only_after_crossing() {
    let position = Position::from_fen("3k5/9/9/9/4P4/9/P8/9/9/4K4 w").expect("fen");
    assert_eq!(sorted_destinations(&position, sq(6, 0)), vec![sq(5, 0)]);
    assert_eq!(
        sorted_destinations(&position, sq(4, 4)),
        vec![sq(3, 4), sq(4, 3), sq(4, 5)]
    );

    let black = Position::from_fen("3k5/9/9/p8/9/5p3/9/9/9/4K4 b").expect("fen");
    assert_eq!(sorted_destinations(&black, sq(3, 0)), vec![sq(4, 0)]);
    assert_eq!(
        sorted_destinations(&black, sq(5, 5)),
        vec![sq(5, 4), sq(5, 6), sq(6, 5)]
    );
}

#[test]
fn destinations_never_include_own_pieces() {
    let fens = [
        jiangjun_core::START_FEN,
        "r1bakab1r/9/1cn4c1/p1p1p3p/6p2/2P6/P3P1P1P/1CN1C1N2/9/R1BAKAB1R b",
    ];
    for fen in fens {
        let position = Position::from_fen(fen).expect("fen");
        for (square, piece) in position.board.pieces() {
            for to in position.destinations(square) {
                assert!(
                    position
                        .piece_at(to)
                        .is_none_or(|other| other.color != piece.color),
                    "{square} -> {to} lands on own piece in {fen}"
                );
            }
        }
    }
}

#[test]
fn pinned_piece_has_no_legal_destinations() {
    let position = Position::from_fen("3k5/9/9/4r4/9/9/9/9/4N4/4K4 w").expect("fen");
    assert!(!position.destinations(sq(8, 4)).is_empty());
    assert!(position.legal_destinations(sq(8, 4)).is_empty());
}

#[test]
fn empty_square_yields_nothing() {
    let position = Position::new();
    assert!(generate_destinations(&position.board, sq(4, 4)).is_empty());
    assert!(position.legal_destinations(sq(4, 4)).is_empty());
}

#[test]
fn lone_general_boxed_in_has_no_legal_move() {
    let position = Position::from_fen("3k5/R8/9/9/9/9/9/9/9/4K4 b").expect("fen");
    let mut board = position.board.clone();
    assert!(!has_legal_move(&mut board, Color::Black));
    assert_eq!(board, position.board);
    assert!(position.legal_moves().is_empty());
}

#[test]
fn perft_matches_baselines_for_depth_1_2() {
    let fixture_path = format!("{}/tests/fixtures/perft.json", env!("CARGO_MANIFEST_DIR"));
    let fixture = std::fs::read_to_string(fixture_path).expect("read fixture");
    let baselines: Vec<PerftBaseline> = serde_json::from_str(&fixture).expect("parse fixture");

    for baseline in baselines {
        let position = Position::from_fen(&baseline.fen).expect("valid fen");
        assert_eq!(
            perft(&position, baseline.depth),
            baseline.nodes,
            "fen={}, depth={}",
            baseline.fen,
            baseline.depth
        );
    }
}
