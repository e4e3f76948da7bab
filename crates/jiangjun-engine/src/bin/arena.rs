use rand::seq::SliceRandom;
use rand::Rng;

use jiangjun_core::{Color, Game};
use jiangjun_engine::{ai_select_move, Difficulty};

const MAX_PLIES: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchResult {
    RedWin,
    BlackWin,
    Draw,
}

fn result_name(result: MatchResult) -> &'static str {
    match result {
        MatchResult::RedWin => "Red win",
        MatchResult::BlackWin => "Black win",
        MatchResult::Draw => "Draw",
    }
}

fn parse_tier(arg: Option<&String>, default: Difficulty) -> Difficulty {
    match arg.map(|s| s.parse::<Difficulty>()) {
        Some(Ok(tier)) => tier,
        Some(Err(err)) => {
            eprintln!("{err}, defaulting to {default}");
            default
        }
        None => default,
    }
}

fn play_random_opening(game: &mut Game, plies: usize, rng: &mut impl Rng) {
    for _ in 0..plies {
        let moves = game.all_legal_moves();
        let Some(mv) = moves.choose(rng).copied() else {
            return;
        };
        if game.make_move(mv).is_err() || game.outcome().is_some() {
            return;
        }
    }
}

fn play_game(red: Difficulty, black: Difficulty, opening_plies: usize) -> (usize, MatchResult) {
    let mut game = Game::new();
    let mut rng = rand::thread_rng();
    play_random_opening(&mut game, opening_plies, &mut rng);

    while game.outcome().is_none() && game.moves_played().len() < MAX_PLIES {
        let side = game.turn();
        let tier = match side {
            Color::Red => red,
            Color::Black => black,
        };
        let Some(mv) = ai_select_move(game.position(), game.history(), side, tier) else {
            break;
        };
        if let Err(err) = game.make_move(mv) {
            eprintln!("engine produced a rejected move {mv}: {err}");
            break;
        }
    }

    let result = match game.outcome().and_then(|outcome| outcome.winner) {
        Some(Color::Red) => MatchResult::RedWin,
        Some(Color::Black) => MatchResult::BlackWin,
        None if game.outcome().is_none() && game.moves_played().len() < MAX_PLIES => {
            // The engine found no acceptable move for the side to move.
            match game.turn() {
                Color::Red => MatchResult::BlackWin,
                Color::Black => MatchResult::RedWin,
            }
        }
        None => MatchResult::Draw,
    };
    (game.moves_played().len(), result)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let num_games: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let red = parse_tier(args.get(2), Difficulty::Medium);
    let black = parse_tier(args.get(3), Difficulty::Easy);
    let opening_plies: usize = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(2);

    eprintln!(
        "Running {num_games} arena games: Red={red}, Black={black}, {opening_plies} random opening plies"
    );

    let mut tally = [0u32; 3];
    for game_num in 1..=num_games {
        let (plies, result) = play_game(red, black, opening_plies);
        let slot = match result {
            MatchResult::RedWin => 0,
            MatchResult::BlackWin => 1,
            MatchResult::Draw => 2,
        };
        tally[slot] += 1;
        eprintln!(
            "Game {game_num}/{num_games}: {plies} plies, {}",
            result_name(result)
        );
    }

    println!(
        "Red ({red}) {} - Black ({black}) {} - Draws {}",
        tally[0], tally[1], tally[2]
    );
}
