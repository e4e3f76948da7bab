pub mod board;
pub mod constants;
pub mod eval;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod position;
pub mod repetition;
pub mod search;
pub mod types;

pub use board::{Board, BoardError, Signature};
pub use constants::{in_palace, on_own_side, SQUARES, START_FEN};
pub use eval::Evaluator;
pub use fen::{encode_fen, parse_fen, FenError, ParsedFen};
pub use game::{Game, GameError, GameOutcome, GameOverReason, MoveRecord};
pub use movegen::{
    generate_all_legal_moves, generate_all_moves, generate_destinations,
    generate_legal_destinations, has_legal_move, in_check, is_square_attacked,
};
pub use position::{Position, PositionError};
pub use repetition::{
    classify_move, evaluate_repetition, Adjudication, ChaseKind, HistoryEntry, MoveClass,
    RepetitionHistory, Violation,
};
pub use search::{SearchLimits, SearchResult, Searcher};
pub use types::{
    Color, Move, MoveList, Piece, PieceType, Score, Square, SquareList, BOARD_COLS, BOARD_ROWS,
    NUM_SQUARES,
};

/// Starting layout with Red to move.
pub fn reset_position() -> Position {
    Position::new()
}

/// Pure transition: the successor position and whatever stood on the
/// destination.
pub fn apply_move(
    position: &Position,
    mv: Move,
) -> Result<(Position, Option<Piece>), PositionError> {
    position.apply_move(mv)
}

/// Destinations for the piece on `square` that keep its General safe.
pub fn legal_moves(position: &Position, square: Square) -> SquareList {
    position.legal_destinations(square)
}

pub fn is_game_over(game: &Game) -> (bool, Option<GameOverReason>, Option<Color>) {
    game.is_game_over()
}
