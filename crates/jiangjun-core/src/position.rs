use thiserror::Error;

use crate::board::{Board, BoardError, Signature};
use crate::constants::START_FEN;
use crate::fen::{encode_fen, parse_fen, ParsedFen};
use crate::movegen::{
    apply_move_on_board, generate_all_legal_moves, generate_all_moves, generate_destinations,
    generate_legal_destinations,
};
use crate::types::{Color, Move, MoveList, Piece, Square, SquareList};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{0}")]
    Fen(String),
    #[error("board error")]
    Board(#[from] BoardError),
    #[error("no piece on source square {0}")]
    EmptySource(Square),
}

/// Board contents plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The starting layout with Red to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::Red,
        }
    }

    pub fn from_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = parse_fen(fen).map_err(|err| PositionError::Fen(err.to_string()))?;
        Ok(Self::from_parsed(parsed))
    }

    pub fn fen(&self) -> String {
        encode_fen(&self.board, self.turn)
    }

    pub fn is_start_position(&self) -> bool {
        self.fen() == START_FEN
    }

    pub fn signature(&self) -> Signature {
        self.board.signature()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Pseudo-legal destinations of the piece on `square`.
    pub fn destinations(&self, square: Square) -> SquareList {
        generate_destinations(&self.board, square)
    }

    /// Destinations that keep the mover's General out of check.
    pub fn legal_destinations(&self, square: Square) -> SquareList {
        let mut scratch = self.board.clone();
        generate_legal_destinations(&mut scratch, square)
    }

    /// Pseudo-legal moves for the side to move.
    pub fn moves(&self) -> MoveList {
        generate_all_moves(&self.board, self.turn)
    }

    pub fn legal_moves(&self) -> MoveList {
        generate_all_legal_moves(&self.board, self.turn)
    }

    /// Pure transition: returns the successor position and the captured
    /// piece, leaving `self` untouched.
    pub fn apply_move(&self, mv: Move) -> Result<(Self, Option<Piece>), PositionError> {
        if !mv.from.is_valid() || !mv.to.is_valid() {
            return Err(PositionError::Board(BoardError::OutOfBounds));
        }
        if self.board.is_empty_at(mv.from) {
            return Err(PositionError::EmptySource(mv.from));
        }
        let mut next = self.clone();
        let captured = next.make_move(mv);
        Ok((next, captured))
    }

    /// In-place make for search probes: moves the piece, flips the turn and
    /// returns whatever stood on the destination. Pair every call with
    /// [`Position::unmake_move`].
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let undo = apply_move_on_board(&mut self.board, mv);
        self.turn = self.turn.opposite();
        undo.captured()
    }

    /// Restores the exact cell contents before `make_move(mv)`.
    pub fn unmake_move(&mut self, mv: Move, captured: Option<Piece>) {
        let moved = self.board.set(mv.to, captured);
        self.board.set(mv.from, moved);
        self.turn = self.turn.opposite();
    }

    fn from_parsed(parsed: ParsedFen) -> Self {
        Self {
            board: parsed.board,
            turn: parsed.turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    #[test]
    fn new_matches_start_fen() {
        let position = Position::new();
        assert_eq!(position.fen(), START_FEN);
        assert!(position.is_start_position());
        assert_eq!(Position::from_fen(START_FEN).unwrap(), position);
    }

    #[test]
    fn apply_move_leaves_original_untouched() {
        let position = Position::new();
        let mv = Move::new(Square::new_unchecked(7, 1), Square::new_unchecked(7, 4));
        let (next, captured) = position.apply_move(mv).unwrap();

        assert_eq!(captured, None);
        assert!(position.is_start_position());
        assert_eq!(next.turn, Color::Black);
        assert_eq!(
            next.piece_at(Square::new_unchecked(7, 4)),
            Some(Piece::new(PieceType::Cannon, Color::Red))
        );
        assert_eq!(next.piece_at(Square::new_unchecked(7, 1)), None);
    }

    #[test]
    fn apply_move_rejects_empty_source() {
        let position = Position::new();
        let from = Square::new_unchecked(4, 4);
        let mv = Move::new(from, Square::new_unchecked(5, 4));
        assert_eq!(
            position.apply_move(mv),
            Err(PositionError::EmptySource(from))
        );
    }
}
