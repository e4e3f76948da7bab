use jiangjun_core::{
    board::Board,
    eval::Evaluator,
    movegen::generate_destinations,
    position::Position,
    types::{Color, Piece, PieceType, Score, Square, BOARD_COLS, BOARD_ROWS},
};

/// Returned when a General is missing from the board.
pub const MATE_SCORE: i32 = 30_000;

/// Bonus per pseudo-legal destination.
pub const MOBILITY_WEIGHT: i32 = 2;

type Table = [[i32; BOARD_COLS as usize]; BOARD_ROWS as usize];

// Tables are laid out from Red's side: row 9 is Red's back rank. Black pieces
// read them with the row reflected.

const GENERAL_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, -20, -30, -20, 0, 0, 0],
    [0, 0, 0, -5, -10, -5, 0, 0, 0],
    [0, 0, 0, 10, 20, 10, 0, 0, 0],
];

const ADVISOR_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 15, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const ELEPHANT_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [-10, 0, 0, 0, 15, 0, 0, 0, -10],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const HORSE_TABLE: Table = [
    [0, 0, 0, 30, 0, 30, 0, 0, 0],
    [0, 30, 60, 35, 20, 35, 60, 30, 0],
    [10, 40, 45, 60, 45, 60, 45, 40, 10],
    [15, 80, 50, 75, 50, 75, 50, 80, 15],
    [0, 50, 45, 65, 70, 65, 45, 50, 0],
    [0, 40, 55, 60, 65, 60, 55, 40, 0],
    [10, 20, 40, 25, 40, 25, 40, 20, 10],
    [15, 10, 20, 25, 10, 25, 20, 10, 15],
    [-25, 0, 10, 15, -60, 15, 10, 0, -25],
    [-10, -25, 0, -10, 0, -10, 0, -25, -10],
];

const CHARIOT_TABLE: Table = [
    [30, 40, 35, 65, 70, 65, 35, 40, 30],
    [30, 60, 45, 80, 135, 80, 45, 60, 30],
    [30, 40, 35, 70, 80, 70, 35, 40, 30],
    [30, 65, 65, 80, 80, 80, 65, 65, 30],
    [40, 55, 55, 70, 75, 70, 55, 55, 40],
    [40, 60, 60, 70, 75, 70, 60, 60, 40],
    [20, 45, 20, 60, 70, 60, 20, 45, 20],
    [-10, 40, 20, 60, 60, 60, 20, 40, -10],
    [0, 40, 30, 60, 0, 60, 30, 40, 0],
    [-30, 30, 20, 60, 0, 60, 20, 30, -30],
];

const CANNON_TABLE: Table = [
    [20, 20, 5, -15, -20, -15, 5, 20, 20],
    [10, 10, 5, -10, -25, -10, 5, 10, 10],
    [5, 5, 5, -15, -10, -15, 5, 5, 5],
    [0, 15, 15, 10, 20, 10, 15, 15, 0],
    [0, 0, 0, 0, 20, 0, 0, 0, 0],
    [-5, 0, 15, 0, 20, 0, 15, 0, -5],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [5, 0, 20, 15, 25, 15, 20, 0, 5],
    [0, 5, 10, 10, 10, 10, 10, 5, 0],
    [0, 0, 5, 15, 15, 15, 5, 0, 0],
];

const SOLDIER_TABLE: Table = [
    [0, 0, 0, 10, 20, 10, 0, 0, 0],
    [90, 110, 150, 180, 190, 180, 150, 110, 90],
    [90, 110, 140, 160, 160, 160, 140, 110, 90],
    [90, 105, 120, 130, 135, 130, 120, 105, 90],
    [70, 85, 90, 120, 130, 120, 90, 85, 70],
    [30, 0, 55, 0, 70, 0, 55, 0, 30],
    [30, 0, 30, 0, 65, 0, 30, 0, 30],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Static value of a piece kind. The General dwarfs everything so that its
/// capture always dominates ordering.
pub const fn piece_value(piece: PieceType) -> i32 {
    match piece {
        PieceType::General => 10_000,
        PieceType::Chariot => 900,
        PieceType::Cannon => 450,
        PieceType::Horse => 400,
        PieceType::Elephant => 200,
        PieceType::Advisor => 200,
        PieceType::Soldier => 100,
    }
}

/// Material, piece-square tables and mobility.
#[derive(Debug, Clone, Copy)]
pub struct ClassicalEval;

impl ClassicalEval {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassicalEval {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for ClassicalEval {
    fn evaluate(&self, position: &Position) -> Score {
        let board = &position.board;
        if board.find_general(Color::Red).is_none() {
            return Score(-MATE_SCORE);
        }
        if board.find_general(Color::Black).is_none() {
            return Score(MATE_SCORE);
        }

        let mut red_score = 0;
        let mut black_score = 0;
        for (square, piece) in board.pieces() {
            let value = piece_score(board, square, piece);
            match piece.color {
                Color::Red => red_score += value,
                Color::Black => black_score += value,
            }
        }

        Score(red_score - black_score)
    }
}

fn piece_score(board: &Board, square: Square, piece: Piece) -> i32 {
    let mobility = generate_destinations(board, square).len() as i32 * MOBILITY_WEIGHT;
    piece_value(piece.piece_type) + pst_bonus(piece, square) + mobility
}

#[inline]
fn pst_bonus(piece: Piece, square: Square) -> i32 {
    let row = match piece.color {
        Color::Red => usize::from(square.row),
        Color::Black => usize::from(BOARD_ROWS - 1 - square.row),
    };
    let col = usize::from(square.col);
    let table = match piece.piece_type {
        PieceType::General => &GENERAL_TABLE,
        PieceType::Advisor => &ADVISOR_TABLE,
        PieceType::Elephant => &ELEPHANT_TABLE,
        PieceType::Horse => &HORSE_TABLE,
        PieceType::Chariot => &CHARIOT_TABLE,
        PieceType::Cannon => &CANNON_TABLE,
        PieceType::Soldier => &SOLDIER_TABLE,
    };
    table[row][col]
}
