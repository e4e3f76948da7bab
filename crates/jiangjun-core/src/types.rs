use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

pub const BOARD_ROWS: u8 = 10;
pub const BOARD_COLS: u8 = 9;
pub const NUM_SQUARES: usize = 90;

/// Side of the board. Red moves first and sits on rows 5-9.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    pub const BOTH: [Self; 2] = [Self::Red, Self::Black];

    pub const fn to_code(self) -> char {
        match self {
            Self::Red => 'w',
            Self::Black => 'b',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'w' | 'r' => Some(Self::Red),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta that moves a piece of this color towards the enemy side.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Black => "Black",
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    General = 0,
    Advisor = 1,
    Elephant = 2,
    Horse = 3,
    Chariot = 4,
    Cannon = 5,
    Soldier = 6,
}

impl PieceType {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::Advisor,
        Self::Elephant,
        Self::Horse,
        Self::Chariot,
        Self::Cannon,
        Self::Soldier,
    ];

    /// Traditional glyph; the two sides use different characters.
    pub const fn glyph(self, color: Color) -> char {
        match (self, color) {
            (Self::General, Color::Red) => '帥',
            (Self::General, Color::Black) => '將',
            (Self::Advisor, Color::Red) => '仕',
            (Self::Advisor, Color::Black) => '士',
            (Self::Elephant, Color::Red) => '相',
            (Self::Elephant, Color::Black) => '象',
            (Self::Horse, Color::Red) => '傌',
            (Self::Horse, Color::Black) => '馬',
            (Self::Chariot, Color::Red) => '俥',
            (Self::Chariot, Color::Black) => '車',
            (Self::Cannon, Color::Red) => '炮',
            (Self::Cannon, Color::Black) => '砲',
            (Self::Soldier, Color::Red) => '兵',
            (Self::Soldier, Color::Black) => '卒',
        }
    }

    /// How many pieces of this kind one side starts with.
    pub const fn max_count(self) -> usize {
        match self {
            Self::General => 1,
            Self::Soldier => 5,
            _ => 2,
        }
    }

    pub const fn fen_code(self) -> char {
        match self {
            Self::General => 'k',
            Self::Advisor => 'a',
            Self::Elephant => 'b',
            Self::Horse => 'n',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 'p',
        }
    }

    pub const fn from_fen_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Self::General),
            'a' => Some(Self::Advisor),
            'b' | 'e' => Some(Self::Elephant),
            'n' | 'h' => Some(Self::Horse),
            'r' => Some(Self::Chariot),
            'c' => Some(Self::Cannon),
            'p' => Some(Self::Soldier),
            _ => None,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    pub const fn glyph(self) -> char {
        self.piece_type.glyph(self.color)
    }

    pub const fn is_general(self) -> bool {
        matches!(self.piece_type, PieceType::General)
    }
}

/// Board intersection. Row 0 is Black's back rank, row 9 is Red's.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn is_valid(self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }

    pub const fn index(self) -> usize {
        self.row as usize * BOARD_COLS as usize + self.col as usize
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        if (0..i16::from(BOARD_ROWS)).contains(&row) && (0..i16::from(BOARD_COLS)).contains(&col) {
            Some(Self::new_unchecked(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let (row, col) = input.trim().split_once(',')?;
        let row = row.trim().parse::<u8>().ok()?;
        let col = col.trim().parse::<u8>().ok()?;
        Self::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses the `row,col-row,col` text form.
    pub fn parse(input: &str) -> Option<Self> {
        let (from, to) = input.split_once('-')?;
        Some(Self::new(Square::parse(from)?, Square::parse(to)?))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(pub i32);

/// A chariot or cannon in the open reaches at most 8 + 9 points.
pub const MAX_DESTINATIONS: usize = 17;

pub type SquareList = ArrayVec<Square, MAX_DESTINATIONS>;
pub type MoveList = ArrayVec<Move, 256>;
