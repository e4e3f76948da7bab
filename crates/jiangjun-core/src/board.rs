use crate::constants::{home_row, SQUARES};
use crate::types::{Color, Piece, PieceType, Square, BOARD_COLS, BOARD_ROWS, NUM_SQUARES};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square out of bounds")]
    OutOfBounds,
}

const BACK_RANK: [PieceType; 9] = [
    PieceType::Chariot,
    PieceType::Horse,
    PieceType::Elephant,
    PieceType::Advisor,
    PieceType::General,
    PieceType::Advisor,
    PieceType::Elephant,
    PieceType::Horse,
    PieceType::Chariot,
];

/// Total, order-sensitive encoding of the board contents: one byte per
/// intersection in row-major order, 0 for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; NUM_SQUARES]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_COLS as usize]; BOARD_ROWS as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
        }
    }

    /// Contents of `square`; off-board squares read as empty.
    pub fn get(&self, square: Square) -> Option<Piece> {
        let (r, c) = square_coords(square)?;
        self.cells[r][c]
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn put(&mut self, piece: Piece, square: Square) -> Result<Option<Piece>, BoardError> {
        let (r, c) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][c].replace(piece))
    }

    pub fn remove(&mut self, square: Square) -> Result<Option<Piece>, BoardError> {
        let (r, c) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][c].take())
    }

    /// Overwrites a cell produced by move generation and returns the old
    /// contents. Used by make/unmake probes; off-board squares are ignored.
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        match square_coords(square) {
            Some((r, c)) => std::mem::replace(&mut self.cells[r][c], piece),
            None => None,
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES
            .into_iter()
            .filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn find_general(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.is_general())
            .map(|(square, _)| square)
    }

    pub fn signature(&self) -> Signature {
        let mut bytes = [0u8; NUM_SQUARES];
        for (square, piece) in self.pieces() {
            bytes[square.index()] = 1 + piece.color as u8 * 7 + piece.piece_type as u8;
        }
        Signature(bytes)
    }

    fn setup_starting_position(&mut self) {
        self.load_side(Color::Black);
        self.load_side(Color::Red);
    }

    fn load_side(&mut self, color: Color) {
        let back = home_row(color);
        let toward = |steps: u8| match color {
            Color::Red => back - steps,
            Color::Black => back + steps,
        };

        for (col, piece_type) in BACK_RANK.into_iter().enumerate() {
            self.place(Piece::new(piece_type, color), back, col as u8);
        }
        for col in [1, 7] {
            self.place(Piece::new(PieceType::Cannon, color), toward(2), col);
        }
        for col in (0..BOARD_COLS).step_by(2) {
            self.place(Piece::new(PieceType::Soldier, color), toward(3), col);
        }
    }

    fn place(&mut self, piece: Piece, row: u8, col: u8) {
        self.set(Square::new_unchecked(row, col), Some(piece));
    }
}

fn square_coords(square: Square) -> Option<(usize, usize)> {
    if !square.is_valid() {
        return None;
    }
    Some((usize::from(square.row), usize::from(square.col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_layout_has_sixteen_pieces_per_side() {
        let board = Board::new();
        assert_eq!(board.pieces_of(Color::Red).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.find_general(Color::Red), Some(Square::new_unchecked(9, 4)));
        assert_eq!(board.find_general(Color::Black), Some(Square::new_unchecked(0, 4)));
    }

    #[test]
    fn starting_layout_is_mirrored() {
        let board = Board::new();
        for (square, piece) in board.pieces_of(Color::Black) {
            let mirror = Square::new_unchecked(9 - square.row, square.col);
            assert_eq!(
                board.get(mirror),
                Some(Piece::new(piece.piece_type, Color::Red))
            );
        }
    }

    #[test]
    fn put_and_remove_reject_off_board_squares() {
        let mut board = Board::empty();
        let piece = Piece::new(PieceType::Horse, Color::Red);
        let off = Square::new_unchecked(10, 0);
        assert_eq!(board.put(piece, off), Err(BoardError::OutOfBounds));
        assert_eq!(board.remove(off), Err(BoardError::OutOfBounds));
        assert_eq!(board.get(off), None);

        let square = Square::new_unchecked(5, 5);
        assert_eq!(board.put(piece, square), Ok(None));
        assert_eq!(board.remove(square), Ok(Some(piece)));
        assert!(board.is_empty_at(square));
    }

    #[test]
    fn signature_distinguishes_side_and_kind() {
        let square = Square::new_unchecked(4, 4);
        let mut red = Board::empty();
        let mut black = Board::empty();
        red.put(Piece::new(PieceType::Chariot, Color::Red), square).unwrap();
        black.put(Piece::new(PieceType::Chariot, Color::Black), square).unwrap();
        assert_ne!(red.signature(), black.signature());
        assert_ne!(red.signature(), Board::empty().signature());

        let signature = red.signature();
        let bytes = signature.as_bytes();
        assert_eq!(bytes.len(), NUM_SQUARES);
        assert_ne!(bytes[square.index()], 0);
        assert_eq!(bytes.iter().filter(|byte| **byte != 0).count(), 1);
        assert_eq!(Board::new().signature(), Board::new().signature());
    }
}
