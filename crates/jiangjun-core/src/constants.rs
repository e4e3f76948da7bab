use crate::types::{Color, Square, BOARD_COLS, NUM_SQUARES};

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

/// Last row on Black's side of the river; Red's half starts one row below.
pub const RIVER_ROW: u8 = 4;

pub const PALACE_COL_MIN: u8 = 3;
pub const PALACE_COL_MAX: u8 = 5;

pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse jumps paired with the orthogonal leg cell that blocks them.
pub const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
    ((-1, -2), (0, -1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
];

pub const SQUARES: [Square; NUM_SQUARES] = {
    let mut squares = [Square::new_unchecked(0, 0); NUM_SQUARES];
    let mut idx = 0;
    while idx < NUM_SQUARES {
        squares[idx] = Square::new_unchecked(
            (idx / BOARD_COLS as usize) as u8,
            (idx % BOARD_COLS as usize) as u8,
        );
        idx += 1;
    }
    squares
};

pub const fn home_row(color: Color) -> u8 {
    match color {
        Color::Red => 9,
        Color::Black => 0,
    }
}

/// True while `square` lies on `color`'s own half of the river.
pub const fn on_own_side(square: Square, color: Color) -> bool {
    match color {
        Color::Red => square.row > RIVER_ROW,
        Color::Black => square.row <= RIVER_ROW,
    }
}

pub const fn in_palace(square: Square, color: Color) -> bool {
    let rows_ok = match color {
        Color::Red => square.row >= 7 && square.row <= 9,
        Color::Black => square.row <= 2,
    };
    rows_ok && square.col >= PALACE_COL_MIN && square.col <= PALACE_COL_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_are_row_major() {
        assert_eq!(SQUARES[0], Square::new_unchecked(0, 0));
        assert_eq!(SQUARES[8], Square::new_unchecked(0, 8));
        assert_eq!(SQUARES[9], Square::new_unchecked(1, 0));
        assert_eq!(SQUARES[89], Square::new_unchecked(9, 8));
        for (idx, square) in SQUARES.iter().enumerate() {
            assert_eq!(square.index(), idx);
        }
    }

    #[test]
    fn palace_bounds() {
        assert!(in_palace(Square::new_unchecked(9, 4), Color::Red));
        assert!(in_palace(Square::new_unchecked(7, 3), Color::Red));
        assert!(!in_palace(Square::new_unchecked(6, 4), Color::Red));
        assert!(!in_palace(Square::new_unchecked(9, 6), Color::Red));
        assert!(in_palace(Square::new_unchecked(0, 5), Color::Black));
        assert!(!in_palace(Square::new_unchecked(3, 4), Color::Black));
        assert!(!in_palace(Square::new_unchecked(9, 4), Color::Black));
    }

    #[test]
    fn river_halves() {
        assert!(on_own_side(Square::new_unchecked(5, 0), Color::Red));
        assert!(!on_own_side(Square::new_unchecked(4, 0), Color::Red));
        assert!(on_own_side(Square::new_unchecked(4, 0), Color::Black));
        assert!(!on_own_side(Square::new_unchecked(5, 0), Color::Black));
    }
}
