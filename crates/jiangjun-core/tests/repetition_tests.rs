use jiangjun_core::repetition::{classify_move, Adjudication, ChaseKind, Violation};
use jiangjun_core::{Color, Game, GameOverReason, Move, Position};

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let mv = Move::parse(text).expect("move text");
        game.make_move(mv)
            .unwrap_or_else(|err| panic!("{text} rejected: {err}"));
    }
}

#[test]
fn perpetual_check_loses_for_the_checking_side() {
    let mut game = Game::from_fen("4k4/9/9/7R1/9/9/9/9/9/3K5 w").expect("fen");
    play(
        &mut game,
        &["3,7-0,7", "0,4-1,4", "0,7-1,7", "1,4-0,4"],
    );
    assert_eq!(game.is_game_over(), (false, None, None));
    assert!(game.moves_played().iter().step_by(2).all(|r| r.is_check));

    play(&mut game, &["1,7-0,7"]);
    assert_eq!(
        game.is_game_over(),
        (true, Some(GameOverReason::PerpetualCheck), Some(Color::Black))
    );
    assert_eq!(
        game.status(),
        "Game Over! Black Wins! (Red loses by perpetual check)"
    );
}

#[test]
fn perpetual_rootless_chase_loses() {
    let mut game = Game::from_fen("4k4/9/1c7/9/9/7R1/9/9/9/3K5 w").expect("fen");
    play(
        &mut game,
        &["5,7-5,1", "2,1-2,7", "5,1-5,7", "2,7-2,1"],
    );
    let red_moves: Vec<_> = game.moves_played().iter().step_by(2).collect();
    assert!(red_moves.iter().all(|r| r.chase == ChaseKind::Rootless));
    assert_eq!(game.is_game_over(), (false, None, None));

    play(&mut game, &["5,7-5,1"]);
    let (over, reason, winner) = game.is_game_over();
    assert!(over);
    assert_eq!(reason, Some(GameOverReason::PerpetualChase));
    assert_eq!(winner, Some(Color::Black));
    assert!(game.status().contains("perpetual rootless chase"));
}

#[test]
fn neutral_shuffling_draws_on_third_occurrence() {
    let mut game = Game::from_fen("3a1k3/9/9/9/9/9/9/9/9/3K1A3 w").expect("fen");
    let cycle = ["9,5-8,4", "0,3-1,4", "8,4-9,5", "1,4-0,3"];
    play(&mut game, &cycle);
    play(&mut game, &cycle);
    assert_eq!(game.is_game_over(), (false, None, None));

    play(&mut game, &cycle[..1]);
    assert_eq!(
        game.is_game_over(),
        (true, Some(GameOverReason::Repetition3Draw), None)
    );
    assert_eq!(game.status(), "Draw by repetition");
    let last = game.history().entries().last().copied().expect("entry");
    let adjudication = game
        .history()
        .evaluate(&last.signature, last.mover)
        .expect("repetition adjudicated");
    assert!(adjudication.is_draw());
    assert!(!adjudication.is_violation());
    assert!(game
        .moves_played()
        .iter()
        .all(|r| !r.is_check && r.chase == ChaseKind::None));
}

#[test]
fn history_evaluation_matches_controller() {
    let mut game = Game::from_fen("4k4/9/9/7R1/9/9/9/9/9/3K5 w").expect("fen");
    play(
        &mut game,
        &["3,7-0,7", "0,4-1,4", "0,7-1,7", "1,4-0,4", "1,7-0,7"],
    );
    let last = game.history().entries().last().copied().expect("entry");
    assert_eq!(
        game.history().evaluate(&last.signature, last.mover),
        Some(Adjudication::Loss {
            loser: Color::Red,
            violation: Violation::PerpetualCheck,
        })
    );
    assert_eq!(game.history().occurrences(&last.signature), 2);
    assert!(!game
        .history()
        .evaluate(&last.signature, last.mover)
        .is_some_and(Adjudication::is_draw));
}

#[test]
fn classification_leaves_board_untouched() {
    let position =
        Position::from_fen("r1bakab1r/9/1cn4c1/p1p1p3p/6p2/2P6/P3P1P1P/1CN1C1N2/9/R1BAKAB1R b")
            .expect("fen");
    let mut board = position.board.clone();
    let _ = classify_move(&mut board, Color::Red);
    let _ = classify_move(&mut board, Color::Black);
    assert_eq!(board, position.board);
}
